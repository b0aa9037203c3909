// animation/sequencer.rs
//
// Runs at most one action graph per node. Starting a graph on a node that
// already has one cancels the old graph in place: whatever it had written
// stays, nothing more is applied.
//
// Completion is reported through tokens rather than callbacks. Callers keep
// the token returned by `run` and match it against `drain_outcomes`, so a
// stale completion can never be mistaken for the current one.

use crate::api::types::NodeId;
use crate::core::scene::Scene;

use super::action::{Action, RunningAction};

/// Handle identifying one `run` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionToken(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphOutcome {
    Finished,
    Cancelled,
}

#[derive(Debug)]
struct RunningGraph {
    token: CompletionToken,
    root: RunningAction,
    /// Remove the node from the scene once the graph finishes.
    despawn_on_finish: bool,
}

#[derive(Debug)]
pub struct Sequencer {
    /// Kept in start order so ticks are deterministic.
    graphs: Vec<(NodeId, RunningGraph)>,
    outcomes: Vec<(CompletionToken, GraphOutcome)>,
    next_token: u32,
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            graphs: Vec::new(),
            outcomes: Vec::new(),
            next_token: 1,
        }
    }

    /// Start `action` on `node`, replacing (and cancelling) any graph already on it.
    pub fn run(&mut self, node: NodeId, action: Action) -> CompletionToken {
        self.start(node, action, false)
    }

    /// Like [`run`](Self::run), but the node is despawned when the graph finishes.
    pub fn run_transient(&mut self, node: NodeId, action: Action) -> CompletionToken {
        self.start(node, action, true)
    }

    fn start(&mut self, node: NodeId, action: Action, despawn_on_finish: bool) -> CompletionToken {
        self.cancel(node);
        let token = CompletionToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1).max(1);
        log::trace!("sequencer: start {:?} on {:?} ({:.3}s)", token, node, action.duration());
        self.graphs.push((
            node,
            RunningGraph {
                token,
                root: action.start(),
                despawn_on_finish,
            },
        ));
        token
    }

    /// Stop the graph on `node`, if any. Its transform is left as-is.
    pub fn cancel(&mut self, node: NodeId) -> Option<CompletionToken> {
        let index = self.graphs.iter().position(|(id, _)| *id == node)?;
        let (_, graph) = self.graphs.remove(index);
        log::trace!("sequencer: cancel {:?} on {:?}", graph.token, node);
        self.outcomes.push((graph.token, GraphOutcome::Cancelled));
        Some(graph.token)
    }

    pub fn cancel_nodes(&mut self, nodes: &[NodeId]) {
        for node in nodes {
            self.cancel(*node);
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, graph) in self.graphs.drain(..) {
            self.outcomes.push((graph.token, GraphOutcome::Cancelled));
        }
    }

    pub fn is_running(&self, node: NodeId) -> bool {
        self.graphs.iter().any(|(id, _)| *id == node)
    }

    /// Whether the graph behind `token` is still active.
    pub fn is_pending(&self, token: CompletionToken) -> bool {
        self.graphs.iter().any(|(_, g)| g.token == token)
    }

    /// Advance every graph by `dt`. Returns how many finished this tick.
    ///
    /// A graph whose node has vanished from the scene is cancelled.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut finished = 0;
        let mut despawn = Vec::new();
        let outcomes = &mut self.outcomes;

        self.graphs.retain_mut(|(id, graph)| {
            let Some(node) = scene.get_mut(*id) else {
                log::debug!("sequencer: node {:?} is gone, cancelling {:?}", id, graph.token);
                outcomes.push((graph.token, GraphOutcome::Cancelled));
                return false;
            };
            if !graph.root.advance(dt, node).finished {
                return true;
            }
            finished += 1;
            outcomes.push((graph.token, GraphOutcome::Finished));
            if graph.despawn_on_finish {
                despawn.push(*id);
            }
            false
        });

        for id in despawn {
            let removed = scene.despawn(id);
            // Graphs on removed descendants would otherwise linger until next tick.
            for child in removed.iter().filter(|c| **c != id) {
                self.cancel(*child);
            }
        }
        finished
    }

    /// Take all outcomes recorded since the last drain, in order.
    pub fn drain_outcomes(&mut self) -> Vec<(CompletionToken, GraphOutcome)> {
        std::mem::take(&mut self.outcomes)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}
