//! Shared services handed to controllers by reference

use crate::error::PanelError;
use crate::focus::ZOrder;
use crate::port::GeometryPort;
use crate::snap::{SnapConfig, SnapEngine};
use crate::window::WindowStateStore;

/// One geometry port, snap engine, window-state store and z-order
///
/// Controllers borrow this for the duration of a single dispatch.
#[derive(Debug)]
pub struct Services<P> {
    pub port: P,
    pub snap: SnapEngine,
    pub states: WindowStateStore,
    pub z_order: ZOrder,
}

impl<P: GeometryPort> Services<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            snap: SnapEngine::default(),
            states: WindowStateStore::new(),
            z_order: ZOrder::default(),
        }
    }

    pub fn with_snap_config(port: P, config: SnapConfig) -> Result<Self, PanelError> {
        Ok(Self {
            snap: SnapEngine::new(config)?,
            ..Self::new(port)
        })
    }
}
