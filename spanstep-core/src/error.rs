//! Error types for the spanstep core library.
//!
//! Each error enum carries a companion code enum whose string forms are
//! stable and safe to log or match on from other processes.

use std::fmt;

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors raised while generating Kruskal steps or querying a
/// [`crate::DisjointSet`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StepperError {
    /// The graph contained no nodes.
    #[error("cannot run Kruskal's algorithm on a graph without nodes")]
    InvalidGraph,
    /// A node id was not part of the disjoint set.
    #[error("node `{node}` is not part of the disjoint set")]
    UnknownNode {
        /// The id that could not be resolved.
        node: NodeId,
    },
    /// An edge referenced a node that was not supplied with the graph.
    #[error("edge {edge} references unknown node `{node}`")]
    UnknownEndpoint {
        /// Edge whose endpoint could not be resolved.
        edge: EdgeId,
        /// The missing endpoint.
        node: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`StepperError`] variants.
    enum StepperErrorCode for StepperError {
        /// The graph contained no nodes.
        InvalidGraph => InvalidGraph => "SPANSTEP_INVALID_GRAPH",
        /// A node id was not part of the disjoint set.
        UnknownNode => UnknownNode { .. } => "SPANSTEP_UNKNOWN_NODE",
        /// An edge referenced a node that was not supplied with the graph.
        UnknownEndpoint => UnknownEndpoint { .. } => "SPANSTEP_UNKNOWN_ENDPOINT",
    }
}

/// Errors raised while configuring a [`crate::PlaybackController`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlaybackError {
    /// The speed multiplier was not a positive, finite number, or produced an
    /// interval longer than [`crate::MAX_INTERVAL`].
    #[error("speed multiplier must be positive, finite and keep the interval within one day (got {got})")]
    InvalidSpeed {
        /// The rejected multiplier.
        got: f64,
    },
    /// The base autoplay interval was zero or longer than
    /// [`crate::MAX_INTERVAL`].
    #[error("base autoplay interval must be greater than zero and at most one day")]
    InvalidInterval,
}

define_error_codes! {
    /// Stable codes describing [`PlaybackError`] variants.
    enum PlaybackErrorCode for PlaybackError {
        /// The speed multiplier was rejected.
        InvalidSpeed => InvalidSpeed { .. } => "SPANSTEP_INVALID_SPEED",
        /// The base autoplay interval was out of range.
        InvalidInterval => InvalidInterval => "SPANSTEP_INVALID_INTERVAL",
    }
}
