// Application state for HTTP handlers
use crate::domain::breakpoints::BreakpointTable;

#[derive(Clone)]
pub struct AppState {
    pub table: BreakpointTable,
}
