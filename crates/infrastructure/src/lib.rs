//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_comment_repository;
mod in_memory_issue_repository;
mod in_memory_project_repository;
mod in_memory_user_repository;
mod jwt_session_token_codec;
mod postgres_comment_repository;
mod postgres_issue_repository;
mod postgres_project_repository;
mod postgres_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_comment_repository::InMemoryCommentRepository;
pub use in_memory_issue_repository::InMemoryIssueRepository;
pub use in_memory_project_repository::InMemoryProjectRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use jwt_session_token_codec::JwtSessionTokenCodec;
pub use postgres_comment_repository::PostgresCommentRepository;
pub use postgres_issue_repository::PostgresIssueRepository;
pub use postgres_project_repository::PostgresProjectRepository;
pub use postgres_user_repository::PostgresUserRepository;
