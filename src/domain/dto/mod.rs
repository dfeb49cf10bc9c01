//! # Data Transfer Objects
//!
//! API 경계에서 사용하는 요청/응답 구조체입니다.
//! 요청 DTO는 `validator`로 검증하고, 응답 DTO는 엔티티에서 `From`으로 변환하며
//! ObjectId는 hex 문자열, 시각은 RFC 3339 문자열로 내보냅니다.
//!
//! ```text
//! dto/
//! ├── common.rs      - 페이지네이션, 메시지, 파일 정보
//! ├── users/         - 가입/로그인/토큰/관리자
//! ├── candidates/    - 지원자 프로필
//! ├── companies/     - 회사
//! ├── offers/        - 채용 공고
//! ├── applications/  - 지원서
//! └── interviews/    - 면접, 녹화
//! ```

pub mod common;
pub mod users;
pub mod candidates;
pub mod companies;
pub mod offers;
pub mod applications;
pub mod interviews;
