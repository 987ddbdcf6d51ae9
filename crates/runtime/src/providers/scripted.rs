//! Replays a fixed list of requests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use battle_core::{ActionRequest, BattleEnv, BattleState, CombatantId};

use crate::api::{ActionProvider, Result, RuntimeError};

/// Hands out queued requests per actor, in submission order.
///
/// An actor with nothing queued waits.
#[derive(Debug, Default)]
pub struct ScriptedActionProvider {
    queues: Mutex<HashMap<CombatantId, VecDeque<ActionRequest>>>,
}

impl ScriptedActionProvider {
    pub fn new(requests: impl IntoIterator<Item = ActionRequest>) -> Self {
        let mut queues: HashMap<CombatantId, VecDeque<ActionRequest>> = HashMap::new();
        for request in requests {
            queues.entry(request.actor).or_default().push_back(request);
        }
        Self {
            queues: Mutex::new(queues),
        }
    }

    pub fn push(&self, request: ActionRequest) -> Result<()> {
        let mut queues = self.lock()?;
        queues.entry(request.actor).or_default().push_back(request);
        Ok(())
    }

    /// Requests not yet handed out.
    pub fn remaining(&self) -> Result<usize> {
        Ok(self.lock()?.values().map(VecDeque::len).sum())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<CombatantId, VecDeque<ActionRequest>>>> {
        self.queues
            .lock()
            .map_err(|_| RuntimeError::Provider("script queue poisoned".into()))
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(
        &self,
        actor: CombatantId,
        _state: &BattleState,
        _env: BattleEnv<'_>,
    ) -> Result<ActionRequest> {
        let next = self
            .lock()?
            .get_mut(&actor)
            .and_then(VecDeque::pop_front);
        Ok(next.unwrap_or_else(|| ActionRequest::wait(actor)))
    }
}
