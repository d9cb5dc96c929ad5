#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    EmptyField(&'static str),
    UnknownArticle(u32),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::EmptyField(field) => {
                write!(f, "Please fill in the {} field", field)
            }
            DomainError::UnknownArticle(id) => {
                write!(f, "Unknown article: {}", id)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
