pub mod answer;
pub mod choice;
pub mod common;
pub mod question;
pub mod survey;
pub mod user;
