use serde::{Deserialize, Serialize};

use crate::{
    model::{BaseModel, Record},
    validate,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSpec {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub rating: i32,
}

impl BaseModel for FeedbackSpec {
    const KEY: &'static str = "Feedback";
    const ID_FIELD: &'static str = "feedbackId";
}

impl FeedbackSpec {
    pub fn validate(&self) -> validate::Result {
        validate::require("Username", &self.username)?;
        validate::rating(self.rating)
    }
}

pub type Feedback = Record<FeedbackSpec>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    pub count: usize,
    pub average: Option<f64>,
    /// Number of ratings for each star, from 1 to 5.
    pub histogram: [usize; 5],
}

impl FromIterator<i32> for FeedbackSummary {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        let mut summary = Self::default();
        let mut sum = 0i64;
        for rating in iter {
            if let Some(slot) = usize::try_from(rating - 1)
                .ok()
                .and_then(|index| summary.histogram.get_mut(index))
            {
                *slot += 1;
                summary.count += 1;
                sum += i64::from(rating);
            }
        }
        if summary.count > 0 {
            summary.average = Some(sum as f64 / summary.count as f64);
        }
        summary
    }
}

impl<'a> FromIterator<&'a FeedbackSpec> for FeedbackSummary {
    fn from_iter<T: IntoIterator<Item = &'a FeedbackSpec>>(iter: T) -> Self {
        iter.into_iter().map(|feedback| feedback.rating).collect()
    }
}
