use crate::state::{StatusId, StatusTemplate};

pub trait StatusOracle: Send + Sync {
    fn status(&self, id: &StatusId) -> Option<StatusTemplate>;
}
