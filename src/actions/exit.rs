use crate::core::action::{Action, Control};
use crate::core::console::Console;

/// Says goodbye and leaves the navigator from whatever depth it is at.
pub struct ExitAction;

impl Action for ExitAction {
    fn invoke(&self, console: &mut dyn Console) -> Control {
        console.write_line("Exiting the application. Goodbye!");
        Control::Exit
    }
}
