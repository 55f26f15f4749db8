//! Background maintenance hook

/// Housekeeping serviced at the top of every clock-loop iteration
///
/// Typical implementations feed a watchdog or poll an update channel.
/// `service` must return quickly and never block.
pub trait MaintenanceService {
    fn service(&mut self);
}

/// No maintenance at all
impl MaintenanceService for () {
    fn service(&mut self) {}
}
