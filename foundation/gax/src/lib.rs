pub mod cancel;
pub mod poll;
