//! SQL query values passed from the generation stage to the executor

use std::fmt;

/// A SQL statement, either already known or computed on demand.
///
/// The deferred form never travels past the executor: `resolve` is called
/// exactly once, right before backend dispatch.
pub enum SqlQuery {
    Literal(String),
    Deferred(Box<dyn FnOnce() -> String + Send>),
}

impl SqlQuery {
    pub fn literal(sql: impl Into<String>) -> Self {
        Self::Literal(sql.into())
    }

    pub fn deferred<F>(f: F) -> Self
    where
        F: FnOnce() -> String + Send + 'static,
    {
        Self::Deferred(Box::new(f))
    }

    /// Produce the plain SQL string, invoking the deferred computation if needed
    pub fn resolve(self) -> String {
        match self {
            SqlQuery::Literal(sql) => sql,
            SqlQuery::Deferred(f) => f(),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, SqlQuery::Deferred(_))
    }
}

impl fmt::Debug for SqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlQuery::Literal(sql) => f.debug_tuple("Literal").field(sql).finish(),
            SqlQuery::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<String> for SqlQuery {
    fn from(sql: String) -> Self {
        Self::Literal(sql)
    }
}

impl From<&str> for SqlQuery {
    fn from(sql: &str) -> Self {
        Self::Literal(sql.to_string())
    }
}
