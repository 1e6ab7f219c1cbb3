pub mod attendance;
pub mod leaves;
pub mod payslips;

pub use attendance::EmployeeAttendancePage;
pub use leaves::EmployeeLeavesPage;
pub use payslips::EmployeePayslipsPage;
