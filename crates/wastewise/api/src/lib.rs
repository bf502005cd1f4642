pub mod bin;
pub mod calendar;
pub mod complaint;
pub mod component;
pub mod feedback;
pub mod inventory;
pub mod model;
pub mod reminder;
pub mod request;
pub mod schedule;
pub mod user;
pub mod validate;
