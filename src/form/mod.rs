pub mod controls;
pub mod merge;
pub mod serializer;
pub mod visibility;
