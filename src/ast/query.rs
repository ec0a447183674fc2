use crate::ast::{Delete, Insert, RawSql, Select, SetOperation, Update};

/// A database query: the top level of the fragment tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Query<'a> {
    Select(Box<Select<'a>>),
    Insert(Box<Insert<'a>>),
    Update(Box<Update<'a>>),
    Delete(Box<Delete<'a>>),
    SetOperation(Box<SetOperation<'a>>),
    Raw(RawSql<'a>),
}

impl<'a> From<Select<'a>> for Query<'a> {
    fn from(select: Select<'a>) -> Self {
        Query::Select(Box::new(select))
    }
}

impl<'a> From<Insert<'a>> for Query<'a> {
    fn from(insert: Insert<'a>) -> Self {
        Query::Insert(Box::new(insert))
    }
}

impl<'a> From<Update<'a>> for Query<'a> {
    fn from(update: Update<'a>) -> Self {
        Query::Update(Box::new(update))
    }
}

impl<'a> From<Delete<'a>> for Query<'a> {
    fn from(delete: Delete<'a>) -> Self {
        Query::Delete(Box::new(delete))
    }
}

impl<'a> From<SetOperation<'a>> for Query<'a> {
    fn from(op: SetOperation<'a>) -> Self {
        Query::SetOperation(Box::new(op))
    }
}

impl<'a> From<RawSql<'a>> for Query<'a> {
    fn from(raw: RawSql<'a>) -> Self {
        Query::Raw(raw)
    }
}
