pub mod feedback;
pub mod response;
