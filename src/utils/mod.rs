// Utils compartidos

pub mod constants;
pub mod cookie;
pub mod magic_ffi;
pub mod storage;
