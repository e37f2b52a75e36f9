//! Spanstep core library.
//!
//! Computes the ordered decisions Kruskal's algorithm makes for a weighted
//! graph and replays them through a cursor-based playback controller.
//!
//! ```
//! use spanstep_core::{Graph, PlaybackBuilder, ManualClock};
//!
//! let run = Graph::sample().run_kruskal().expect("sample graph is valid");
//! assert_eq!(run.final_cost(), 21.0);
//!
//! let mut playback = PlaybackBuilder::new()
//!     .build_with_clock(run.shared_steps(), ManualClock::new())
//!     .expect("default playback configuration is valid");
//! assert!(playback.step_forward());
//! assert_eq!(playback.visible_mst().len(), 1);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod clock;
mod dsu;
mod error;
mod graph;
mod playback;
mod steps;
#[cfg(test)]
mod test_utils;

pub use crate::{
    clock::{Clock, ManualClock, SystemClock},
    dsu::{DisjointSet, DsuEntry, DsuSnapshot},
    error::{PlaybackError, PlaybackErrorCode, StepperError, StepperErrorCode},
    graph::{Edge, EdgeId, Graph, Node, NodeId, Position},
    playback::{
        DEFAULT_BASE_INTERVAL, DEFAULT_SPEED, MAX_INTERVAL, PendingAdvance, PlaybackBuilder,
        PlaybackController, PlaybackView, READY_MESSAGE,
    },
    steps::{AlgorithmStep, Decision, KruskalRun, generate_steps},
};
