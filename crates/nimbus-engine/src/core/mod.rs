pub mod astronomy;
pub mod session;
pub mod time;
