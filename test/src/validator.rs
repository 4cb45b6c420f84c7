use fedvote_engine::StatementValidator;

use crate::{Statement, TestContext};

/// Rejects the empty statement, accepts everything else.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NonEmptyStatement;

impl StatementValidator<TestContext> for NonEmptyStatement {
    fn is_valid(&self, statement: &Statement) -> bool {
        !statement.is_empty()
    }
}
