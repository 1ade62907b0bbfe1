//! # Menu Actions
//!
//! The concrete behaviors menu entries can name. Each family is a struct
//! implementing [`Action`](crate::core::action::Action); the ones that talk
//! to an emulator get their client injected through [`Services`].
//!
//! | name                | type                 |
//! |---------------------|----------------------|
//! | `exit`              | [`ExitAction`]       |
//! | `user.Create`       | [`CreateUsers`]      |
//! | `user.List`         | [`ListUsers`]        |
//! | `collection.Create` | [`CreateCollection`] |
//! | `collection.List`   | [`ListCollections`]  |
//! | `document.Create`   | [`CreateDocument`]   |
//! | `document.List`     | [`ListDocuments`]    |

pub mod collection;
pub mod document;
pub mod exit;
pub mod table;
pub mod user;

pub use collection::{CreateCollection, ListCollections};
pub use document::{CreateDocument, ListDocuments};
pub use exit::ExitAction;
pub use user::{CreateUsers, ListUsers};

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::core::action::ActionTable;
use crate::emulator::{DocumentStore, IdentityStore};

/// Everything the actions depend on, built once in `main`.
#[derive(Clone)]
pub struct Services {
    pub documents: Arc<dyn DocumentStore>,
    pub identities: Arc<dyn IdentityStore>,
    /// Runtime the async store calls are driven on. Actions block on it.
    pub runtime: Handle,
    /// Directory `document.Create` reads its JSON files from.
    pub assets_dir: PathBuf,
    /// Seed accounts for `user.Create` / `user.List`.
    pub users_file: PathBuf,
}

/// Binds every built-in action name.
pub fn build_action_table(services: &Services) -> ActionTable {
    ActionTable::new()
        .with("exit", ExitAction)
        .with(
            "user.Create",
            CreateUsers::new(services.identities.clone(), services.runtime.clone(), services.users_file.clone()),
        )
        .with(
            "user.List",
            ListUsers::new(services.identities.clone(), services.runtime.clone(), services.users_file.clone()),
        )
        .with(
            "collection.Create",
            CreateCollection::new(services.documents.clone(), services.runtime.clone()),
        )
        .with(
            "collection.List",
            ListCollections::new(services.documents.clone(), services.runtime.clone()),
        )
        .with(
            "document.Create",
            CreateDocument::new(services.documents.clone(), services.runtime.clone(), services.assets_dir.clone()),
        )
        .with(
            "document.List",
            ListDocuments::new(services.documents.clone(), services.runtime.clone()),
        )
}
