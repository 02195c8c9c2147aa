pub mod qiniu;
pub mod storage;
