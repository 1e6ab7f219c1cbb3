pub mod attendance;
pub mod leaves;

pub use attendance::ManagerAttendancePage;
pub use leaves::ManagerLeavesPage;
