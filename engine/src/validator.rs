use fedvote_common::Context;

/// Decides whether a statement is well-formed before the engine acts on it.
///
/// The engine has no side effects at all for statements rejected by its validator.
pub trait StatementValidator<Ctx>
where
    Ctx: Context,
{
    fn is_valid(&self, statement: &Ctx::Statement) -> bool;
}

/// Validator accepting every statement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl<Ctx> StatementValidator<Ctx> for AcceptAll
where
    Ctx: Context,
{
    fn is_valid(&self, _statement: &Ctx::Statement) -> bool {
        true
    }
}

impl<Ctx, F> StatementValidator<Ctx> for F
where
    Ctx: Context,
    F: Fn(&Ctx::Statement) -> bool,
{
    fn is_valid(&self, statement: &Ctx::Statement) -> bool {
        self(statement)
    }
}
