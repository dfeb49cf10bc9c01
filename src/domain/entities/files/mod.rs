//! 업로드된 파일(CV, 면접 녹화)의 저장 위치 정보

pub mod stored_file;

pub use stored_file::*;
