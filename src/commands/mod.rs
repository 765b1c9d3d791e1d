pub mod batch;
pub mod doctor;
pub mod download;
pub mod menu;
