//! CPU scheduling domain models.
//!
//! Provides the data types exchanged with the simulation engine: raw
//! requests, validated process definitions, algorithm configuration,
//! timelines and per-process results.
//!
//! # Lifecycle
//!
//! | Type | Created by | Mutable |
//! |------|------------|---------|
//! | `SimulationRequest`, `ProcessInput` | input layer | no |
//! | `ProcessSpec`, `AlgorithmConfig` | validator | no |
//! | `Timeline`, `ProcessResult` | simulation service | no |

mod algorithm;
mod process;
mod process_list;
mod request;
mod result;
mod timeline;

pub use algorithm::{AlgorithmConfig, TimeQuantum};
pub use process::ProcessSpec;
pub use process_list::ProcessList;
pub use request::{ProcessInput, SimulationRequest};
pub use result::{ProcessResult, SimulationResponse};
pub use timeline::{SegmentOwner, Timeline, TimelineSegment, IDLE_PROCESS_ID};
