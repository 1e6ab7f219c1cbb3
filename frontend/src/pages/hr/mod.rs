pub mod attendance;
pub mod employees;
pub mod leaves;

pub use attendance::HrAttendancePage;
pub use employees::HrEmployeesPage;
pub use leaves::HrLeavesPage;
