pub mod attendance;
pub mod employees;
pub mod leaves;
pub mod payroll;

pub use attendance::AdminAttendancePage;
pub use employees::AdminEmployeesPage;
pub use leaves::AdminLeavesPage;
pub use payroll::AdminPayrollPage;
