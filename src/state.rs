#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ManagerState {
    Empty,         // Nothing showing; the next draw activates slide 0 if there is one
    Active(usize), // Index of the slide currently showing
}
