//! Geograph core library: incremental random geometric graphs with
//! shrinking connection thresholds, shortest-path trees and the route and
//! ball statistics measured on them.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod collect;
mod error;
mod graph;
mod point;
mod shortest_paths;
#[cfg(feature = "simulation")]
#[cfg_attr(docsrs, doc(cfg(feature = "simulation")))]
mod simulation;
mod statistics;

pub use crate::{
    collect::{BallTracker, PathSample, PathTable, ReportHeader, StatsCollector, write_report},
    error::{GeometryError, GeometryErrorCode, GraphError, GraphErrorCode, Result},
    graph::{HalfEdge, ProximityGraph, VertexId},
    point::Point,
    shortest_paths::{ShortestPathTree, UNREACHABLE},
    statistics::{BallStatistics, LineDistance, PathStatistics},
};

#[cfg(feature = "simulation")]
#[cfg_attr(docsrs, doc(cfg(feature = "simulation")))]
pub use crate::{
    error::{SimulationError, SimulationErrorCode},
    simulation::{
        RunSummary, Simulation, SimulationBuilder, ThresholdSchedule, UniformBox,
        derive_trial_seed,
    },
};
