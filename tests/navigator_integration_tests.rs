use std::cell::RefCell;
use std::rc::Rc;

use emunav::actions::ExitAction;
use emunav::core::{Action, ActionTable, Console, Control, LineConsole, MenuTree, Navigator, Outcome};

// ============================================================================
// Helper Functions
// ============================================================================

/// Records each invocation by name into a shared log.
struct Recorder {
    name: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Action for Recorder {
    fn invoke(&self, _console: &mut dyn Console) -> Control {
        self.log.borrow_mut().push(self.name);
        Control::Continue
    }
}

/// Asks a question of its own, the way domain actions do.
struct Asker {
    answers: Rc<RefCell<Vec<String>>>,
}

impl Action for Asker {
    fn invoke(&self, console: &mut dyn Console) -> Control {
        let answer = emunav::core::console::prompt(console, "Name? ");
        self.answers.borrow_mut().push(answer);
        Control::Continue
    }
}

const SCENARIO_MENU: &str = r#"
{
  "menu": [
    { "id": 1, "label": "Create User", "action": "user.Create" },
    { "id": 2, "label": "Manage Data", "subMenu": [
        { "id": 1, "label": "Create Collection", "action": "collection.Create" }
    ] },
    { "id": 0, "label": "Exit", "action": "exit" }
  ]
}
"#;

fn scenario_table(log: &Rc<RefCell<Vec<&'static str>>>) -> ActionTable {
    ActionTable::new()
        .with("user.Create", Recorder { name: "user.Create", log: log.clone() })
        .with(
            "collection.Create",
            Recorder { name: "collection.Create", log: log.clone() },
        )
        .with("exit", ExitAction)
}

/// Runs the navigator over `input`, returning the outcome and everything printed.
fn drive(tree: &MenuTree, actions: &ActionTable, input: &str) -> (Outcome, String) {
    let mut console = LineConsole::new(input.as_bytes(), Vec::new());
    let outcome = Navigator::new(tree, actions).run(&mut console);
    (outcome, String::from_utf8(console.into_output()).unwrap())
}

const ROOT_BLOCK: &str = "Main Menu:\n1. Create User\n2. Manage Data\n0. Exit\nEnter your choice: ";
const SUB_BLOCK: &str = "  Manage Data:\n  1. Create Collection\n  0. Back\n  Enter your choice: ";

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_descend_invoke_return_and_exit() {
    let tree = MenuTree::from_json(SCENARIO_MENU).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let actions = scenario_table(&log);

    let (outcome, output) = drive(&tree, &actions, "2\n1\n0\n0\n");

    assert_eq!(outcome, Outcome::ExitRequested);
    assert_eq!(log.borrow().as_slice(), ["collection.Create"]);
    let expected = format!(
        "{ROOT_BLOCK}{SUB_BLOCK}{SUB_BLOCK}{ROOT_BLOCK}Exiting the application. Goodbye!\n"
    );
    assert_eq!(output, expected);
}

#[test]
fn test_exit_stops_reading_input() {
    let tree = MenuTree::from_json(SCENARIO_MENU).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let actions = scenario_table(&log);

    // Lines after the exit must never be consumed.
    let (outcome, output) = drive(&tree, &actions, "0\n1\n1\n");
    assert_eq!(outcome, Outcome::ExitRequested);
    assert!(log.borrow().is_empty());
    assert_eq!(output.matches("Enter your choice").count(), 1);
}

#[test]
fn test_exit_from_nested_level() {
    let tree = MenuTree::from_json(
        r#"{ "menu": [ { "id": 1, "label": "A", "subMenu": [
              { "id": 1, "label": "B", "subMenu": [
                  { "id": 9, "label": "Quit", "action": "exit" } ] } ] } ] }"#,
    )
    .unwrap();
    let actions = ActionTable::new().with("exit", ExitAction);

    let (outcome, output) = drive(&tree, &actions, "1\n1\n9\n");
    assert_eq!(outcome, Outcome::ExitRequested);
    assert!(output.contains("    9. Quit\n"));
    assert!(output.ends_with("Goodbye!\n"));
}

#[test]
fn test_invalid_input_reprompts_same_level_once() {
    let tree = MenuTree::from_json(SCENARIO_MENU).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let actions = scenario_table(&log);

    let (_, output) = drive(&tree, &actions, "2\nabc\n0\n0\n");
    let expected = format!(
        "{ROOT_BLOCK}{SUB_BLOCK}  Invalid input. Please enter the number of your choice.\n{SUB_BLOCK}{ROOT_BLOCK}Exiting the application. Goodbye!\n"
    );
    assert_eq!(output, expected);
    assert_eq!(output.matches("Invalid input").count(), 1);
}

#[test]
fn test_unknown_choice_keeps_level() {
    let tree = MenuTree::from_json(SCENARIO_MENU).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let actions = scenario_table(&log);

    let (_, output) = drive(&tree, &actions, "2\n7\n1\n0\n0\n");
    assert!(output.contains(&format!("  Invalid choice. Please try again.\n{SUB_BLOCK}")));
    // Still in the submenu: "1" hit Create Collection, not Create User.
    assert_eq!(log.borrow().as_slice(), ["collection.Create"]);
}

#[test]
fn test_root_lists_every_entry_once_in_order() {
    let tree = MenuTree::from_json(SCENARIO_MENU).unwrap();
    let actions = ActionTable::new();

    let (outcome, output) = drive(&tree, &actions, "");
    assert_eq!(outcome, Outcome::InputClosed);
    assert_eq!(output, ROOT_BLOCK);
    for entry in tree.entries() {
        let line = format!("{}. {}\n", entry.id, entry.label);
        assert_eq!(output.matches(&line).count(), 1);
    }
}

#[test]
fn test_action_only_entry_never_descends() {
    let tree = MenuTree::from_json(SCENARIO_MENU).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let actions = scenario_table(&log);

    let (_, output) = drive(&tree, &actions, "1\n0\n");
    assert_eq!(log.borrow().as_slice(), ["user.Create"]);
    assert!(!output.contains("Back"));
}

#[test]
fn test_children_only_entry_never_invokes() {
    let tree = MenuTree::from_json(SCENARIO_MENU).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let actions = scenario_table(&log);

    let (_, _) = drive(&tree, &actions, "2\n0\n0\n");
    assert!(log.borrow().is_empty());
}

#[test]
fn test_action_prompts_share_the_console() {
    let tree = MenuTree::from_json(
        r#"{ "menu": [ { "id": 1, "label": "Ask", "action": "ask" },
                       { "id": 2, "label": "Quit", "action": "exit" } ] }"#,
    )
    .unwrap();
    let answers = Rc::new(RefCell::new(Vec::new()));
    let actions = ActionTable::new()
        .with("ask", Asker { answers: answers.clone() })
        .with("exit", ExitAction);

    let (outcome, output) = drive(&tree, &actions, "1\n  Ada  \n2\n");
    assert_eq!(outcome, Outcome::ExitRequested);
    assert_eq!(answers.borrow().as_slice(), ["Ada"]);
    assert!(output.contains("Enter your choice: Name? Main Menu:\n"));
}

#[test]
fn test_reserved_zero_in_submenu_rejected_at_load() {
    let result = MenuTree::from_json(
        r#"{ "menu": [ { "id": 1, "label": "Data", "subMenu": [
              { "id": 0, "label": "Shadowed" } ] } ] }"#,
    );
    assert!(result.is_err());
}
