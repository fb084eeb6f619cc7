pub mod financial;
pub mod net;
pub mod text;
