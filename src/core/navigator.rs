//! # Navigator
//!
//! The interactive loop over a [`MenuTree`]. Each level shows its entries,
//! reads a number, and either runs the entry's action, descends into its
//! children, or both (action first).
//!
//! ```text
//!   stack: [ root ]                 "2"  ──► push "Manage Data"
//!   stack: [ root, Manage Data ]    "1"  ──► invoke collection.Create
//!   stack: [ root, Manage Data ]    "0"  ──► pop
//!   stack: [ root ]                 "0"  ──► invoke exit ──► Control::Exit
//! ```
//!
//! Descent is an explicit frame stack, not recursion. Bad input never moves
//! the user: it is reported and the same level is shown again.

use log::{debug, info, warn};

use crate::core::action::{ActionTable, Control};
use crate::core::console::Console;
use crate::core::menu::{BACK_ID, MenuEntry, MenuTree};

const ROOT_TITLE: &str = "Main Menu";
const BACK_LABEL: &str = "Back";

/// Why [`Navigator::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An action returned [`Control::Exit`].
    ExitRequested,
    /// The input stream ended.
    ///
    /// End of input stops the loop instead of re-prompting: a closed stdin
    /// would otherwise redraw the menu forever. Other read failures are
    /// treated as an invalid line and the level is shown again.
    InputClosed,
}

/// What one line of input means at the current level.
#[derive(Debug, PartialEq)]
pub enum Selection<'a> {
    Entry(&'a MenuEntry),
    Back,
    /// Not an integer.
    InvalidInput,
    /// An integer that names no entry here.
    UnknownChoice(i64),
}

/// Interprets `line` against the entries of one level.
///
/// A real entry always wins; `0` only means "back" below the root when no
/// entry at that level uses it.
pub fn select<'a>(line: &str, entries: &'a [MenuEntry], depth: usize) -> Selection<'a> {
    let Ok(id) = line.trim().parse::<i64>() else {
        return Selection::InvalidInput;
    };
    match entries.iter().find(|entry| entry.id == id) {
        Some(entry) => Selection::Entry(entry),
        None if depth > 0 && id == BACK_ID => Selection::Back,
        None => Selection::UnknownChoice(id),
    }
}

/// One level of the descent path.
struct Frame<'a> {
    title: &'a str,
    entries: &'a [MenuEntry],
}

pub struct Navigator<'a> {
    tree: &'a MenuTree,
    actions: &'a ActionTable,
}

impl<'a> Navigator<'a> {
    pub fn new(tree: &'a MenuTree, actions: &'a ActionTable) -> Self {
        Self { tree, actions }
    }

    /// Runs until an action asks to exit or the input ends.
    pub fn run(&self, console: &mut dyn Console) -> Outcome {
        let mut stack = vec![Frame {
            title: ROOT_TITLE,
            entries: self.tree.entries(),
        }];

        loop {
            let depth = stack.len() - 1;
            let frame = &stack[depth];
            let indent = indent(depth);
            render_level(console, frame, depth);

            let line = match console.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("Input closed at depth {}, leaving navigator", depth);
                    return Outcome::InputClosed;
                }
                Err(e) => {
                    warn!("Failed to read selection: {}", e);
                    String::new()
                }
            };

            match select(&line, frame.entries, depth) {
                Selection::InvalidInput => {
                    debug!("Unparseable selection {:?} at depth {}", line, depth);
                    console.write_line(&format!(
                        "{indent}Invalid input. Please enter the number of your choice."
                    ));
                }
                Selection::UnknownChoice(id) => {
                    debug!("No entry {} at depth {}", id, depth);
                    console.write_line(&format!("{indent}Invalid choice. Please try again."));
                }
                Selection::Back => {
                    debug!("Going back from '{}'", frame.title);
                    stack.pop();
                }
                Selection::Entry(entry) => {
                    debug!("Selected {} '{}' at depth {}", entry.id, entry.label, depth);
                    if self.dispatch(console, entry, &indent) == Control::Exit {
                        info!("Exit requested from '{}'", entry.label);
                        return Outcome::ExitRequested;
                    }
                    if entry.has_children() {
                        stack.push(Frame {
                            title: &entry.label,
                            entries: &entry.children,
                        });
                    }
                }
            }
        }
    }

    /// Runs the entry's action, if it has one.
    fn dispatch(&self, console: &mut dyn Console, entry: &MenuEntry, indent: &str) -> Control {
        let Some(name) = entry.action() else {
            return Control::Continue;
        };
        match self.actions.resolve(name) {
            Some(action) => {
                debug!("Invoking action '{}'", name);
                action.invoke(console)
            }
            None => {
                warn!("Entry '{}' names unbound action '{}'", entry.label, name);
                console.write_line(&format!("{indent}Error: Action '{name}' not implemented."));
                Control::Continue
            }
        }
    }
}

/// Convenience wrapper: `Navigator::new(tree, actions).run(console)`.
pub fn run(tree: &MenuTree, actions: &ActionTable, console: &mut dyn Console) -> Outcome {
    Navigator::new(tree, actions).run(console)
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn render_level(console: &mut dyn Console, frame: &Frame<'_>, depth: usize) {
    let indent = indent(depth);
    console.write_line(&format!("{indent}{}:", frame.title));
    for entry in frame.entries {
        console.write_line(&format!("{indent}{}. {}", entry.id, entry.label));
    }
    if depth > 0 {
        console.write_line(&format!("{indent}{BACK_ID}. {BACK_LABEL}"));
    }
    console.write(&format!("{indent}Enter your choice: "));
}
