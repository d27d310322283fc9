//! Main menu state machine.
//!
//! The session moves between [`MenuState`]s one prompt at a time. Every
//! operation returns to `Idle`; `Exit` is only reached from `Idle` after the
//! operator confirms.

use vibes_core::storage::VibeRepository;
use vibes_core::vibe::{validate_title, CreateVibeRequest, Vibe, DEFAULT_CATEGORY};

use crate::console::{self, Prompter, Reporter};
use crate::error::SessionError;
use crate::manager::VibesManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Idle,
    Creating,
    SelectingForDelete,
    ConfirmingDelete(Vibe),
    Exit,
}

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    List,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::Add,
        MenuChoice::Remove,
        MenuChoice::List,
        MenuChoice::Exit,
    ];

    pub const DEFAULT: MenuChoice = MenuChoice::List;

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "1. Add a new vibe",
            MenuChoice::Remove => "2. Remove a vibe",
            MenuChoice::List => "3. List all vibes",
            MenuChoice::Exit => "4. Exit",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// Runs the menu until the operator exits.
///
/// Store failures are reported and the loop continues; only prompt
/// failures and interrupts end the session early.
pub async fn run<R: VibeRepository>(
    manager: &VibesManager<R>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Reporter,
) -> Result<(), SessionError> {
    let mut state = MenuState::Idle;
    while state != MenuState::Exit {
        state = step(state, manager, prompter, out).await?;
    }
    Ok(())
}

/// Performs one transition.
pub async fn step<R: VibeRepository>(
    state: MenuState,
    manager: &VibesManager<R>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Reporter,
) -> Result<MenuState, SessionError> {
    match state {
        MenuState::Idle => idle(manager, prompter, out).await,
        MenuState::Creating => create(manager, prompter, out).await,
        MenuState::SelectingForDelete => {
            out.heading("Remove a vibe:");
            match manager.select_for_removal(prompter, out).await? {
                Some(vibe) => Ok(MenuState::ConfirmingDelete(vibe)),
                None => {
                    out.warning("Operation cancelled.");
                    Ok(MenuState::Idle)
                }
            }
        }
        MenuState::ConfirmingDelete(vibe) => confirm_delete(vibe, manager, prompter, out).await,
        MenuState::Exit => Ok(MenuState::Exit),
    }
}

async fn idle<R: VibeRepository>(
    manager: &VibesManager<R>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Reporter,
) -> Result<MenuState, SessionError> {
    console::show_rule(out);
    out.heading("Main Menu");

    let labels: Vec<String> = MenuChoice::ALL
        .iter()
        .map(|c| c.label().to_string())
        .collect();
    let picked = prompter
        .select("What would you like to do?", &labels, MenuChoice::DEFAULT.index())
        .await?;

    match MenuChoice::ALL.get(picked).copied().unwrap_or(MenuChoice::DEFAULT) {
        MenuChoice::Add => Ok(MenuState::Creating),
        MenuChoice::Remove => Ok(MenuState::SelectingForDelete),
        MenuChoice::List => {
            out.heading("Listing all vibes:");
            if let Ok(vibes) = manager.list(out).await {
                manager.render(&vibes, out);
            }
            Ok(MenuState::Idle)
        }
        MenuChoice::Exit => {
            if prompter.confirm("Are you sure you want to exit?", false).await? {
                out.success("Thanks for using Vibes Manager!");
                Ok(MenuState::Exit)
            } else {
                Ok(MenuState::Idle)
            }
        }
    }
}

async fn create<R: VibeRepository>(
    manager: &VibesManager<R>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Reporter,
) -> Result<MenuState, SessionError> {
    out.heading("Adding a new vibe:");

    let raw_title = prompter.input("Enter vibe title", None).await?;
    let title = match validate_title(&raw_title) {
        Ok(title) => title,
        Err(err) => {
            out.error(&err.to_string());
            return Ok(MenuState::Idle);
        }
    };
    let description = prompter.input("Enter vibe description", None).await?;
    let category = prompter
        .input("Enter category", Some(DEFAULT_CATEGORY))
        .await?;

    let request = CreateVibeRequest::new(title)
        .with_description(description.trim())
        .with_category(category.trim());
    // Failures are already reported.
    let _ = manager.create(request, out).await;
    Ok(MenuState::Idle)
}

async fn confirm_delete<R: VibeRepository>(
    vibe: Vibe,
    manager: &VibesManager<R>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Reporter,
) -> Result<MenuState, SessionError> {
    let title = if vibe.title.is_empty() {
        "Unknown"
    } else {
        vibe.title.as_str()
    };

    let confirmed = prompter
        .confirm(
            &format!("Are you sure you want to permanently delete '{title}'?"),
            false,
        )
        .await?;
    if !confirmed {
        out.warning("Deletion cancelled.");
        return Ok(MenuState::Idle);
    }

    match manager.delete(&vibe.id, out).await {
        Ok(()) => out.success(&format!("Successfully removed '{title}'")),
        Err(_) => out.error(&format!("Failed to remove '{title}'")),
    }
    Ok(MenuState::Idle)
}
