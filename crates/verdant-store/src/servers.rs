//! The server (guild) directory: the joined communities and the current
//! selection.
//!
//! The list and the current-server pointer are persisted in separate slots
//! so a reload can restore "no selection" distinctly from "first server".
//! Joining has no backend: a structurally valid invite code is enough to
//! fabricate the server client-side.

use uuid::Uuid;

use verdant_shared::models::Server;
use verdant_shared::{seed, InviteToken};

use crate::error::{Result, StoreError};
use crate::storage::Storage;

const SERVERS_SLOT: &str = "verdant_servers";
const CURRENT_SERVER_SLOT: &str = "verdant_current_server";

pub struct ServerDirectory {
    storage: Storage,
    servers: Vec<Server>,
    current_id: Option<String>,
}

impl ServerDirectory {
    /// Hydrate the directory, seeding the default servers on first run.
    ///
    /// A stale current-server pointer (persisted id no longer in the list)
    /// is kept as-is; resolution simply yields no server for it.
    pub fn new(storage: Storage) -> Result<Self> {
        let servers = match storage.read_slot(SERVERS_SLOT) {
            Some(list) => list,
            None => {
                let seeds = seed::default_servers();
                storage.write_slot(SERVERS_SLOT, &seeds)?;
                seeds
            }
        };
        let current_id = storage.read_slot(CURRENT_SERVER_SLOT);

        Ok(Self {
            storage,
            servers,
            current_id,
        })
    }

    /// All servers, in insertion order.
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn contains(&self, id: &str) -> bool {
        self.servers.iter().any(|s| s.id == id)
    }

    pub fn current_server_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// The currently selected server, or `None` for the cross-server
    /// direct-message view (or a stale pointer).
    pub fn current_server(&self) -> Option<&Server> {
        self.current_id
            .as_deref()
            .and_then(|id| self.servers.iter().find(|s| s.id == id))
    }

    /// "Current or find by id": the explicit current pointer wins when it
    /// matches the request (or when nothing is requested); otherwise fall
    /// back to a plain lookup in the list.
    pub fn resolve_selection(&self, requested: Option<&str>) -> Option<&Server> {
        match requested {
            None => self.current_server(),
            Some(id) if self.current_id.as_deref() == Some(id) => self.current_server(),
            Some(id) => self.servers.iter().find(|s| s.id == id),
        }
    }

    /// Create a server with a fresh id. Appended to the end of the list;
    /// does not change the selection.
    pub fn create_server(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        icon: Option<String>,
    ) -> Result<Server> {
        let server = Server {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            icon,
            description,
        };
        self.append(server.clone())?;
        tracing::info!(server_id = %server.id, name = %server.name, "server created");
        Ok(server)
    }

    /// Join via an invite code. The code must decode to an [`InviteToken`];
    /// an empty or malformed code fails with [`StoreError::InvalidInvite`].
    pub fn join_server(&mut self, code: &str) -> Result<Server> {
        let token = InviteToken::decode(code)?;
        let server = Server {
            id: Uuid::new_v4().to_string(),
            name: token.payload.server_name,
            icon: token.payload.server_icon,
            description: None,
        };
        self.append(server.clone())?;
        tracing::info!(server_id = %server.id, name = %server.name, "server joined");
        Ok(server)
    }

    /// Remove a server. If it was selected, the selection cascades to the
    /// first remaining server, or to none.
    pub fn leave_server(&mut self, id: &str) -> Result<()> {
        if !self.contains(id) {
            return Err(StoreError::NotFound);
        }

        let remaining: Vec<Server> = self
            .servers
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        self.storage.write_slot(SERVERS_SLOT, &remaining)?;
        self.servers = remaining;

        if self.current_id.as_deref() == Some(id) {
            let next = self.servers.first().map(|s| s.id.clone());
            self.set_current(next)?;
        }

        tracing::info!(server_id = %id, "server left");
        Ok(())
    }

    /// Select a server, or `None` (and the empty string) for the
    /// direct-message view. Selecting an id that is not in the directory
    /// fails with [`StoreError::NotFound`] rather than silently sticking.
    pub fn select_server(&mut self, id: Option<&str>) -> Result<()> {
        let id = id.filter(|v| !v.is_empty());
        if let Some(id) = id {
            if !self.contains(id) {
                return Err(StoreError::NotFound);
            }
        }
        self.set_current(id.map(String::from))
    }

    fn set_current(&mut self, id: Option<String>) -> Result<()> {
        match &id {
            Some(id) => self.storage.write_slot(CURRENT_SERVER_SLOT, id)?,
            None => self.storage.clear_slot(CURRENT_SERVER_SLOT)?,
        }
        self.current_id = id;
        Ok(())
    }

    fn append(&mut self, server: Server) -> Result<()> {
        self.servers.push(server);
        if let Err(e) = self.storage.write_slot(SERVERS_SLOT, &self.servers) {
            self.servers.pop();
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_directory(dir: &tempfile::TempDir) -> ServerDirectory {
        ServerDirectory::new(Storage::open_at(dir.path()).unwrap()).unwrap()
    }

    #[test]
    fn first_run_seeds_default_servers() {
        let dir = tempfile::tempdir().unwrap();
        let directory = open_directory(&dir);

        assert_eq!(directory.servers().len(), 4);
        assert_eq!(directory.servers()[0].name, "Verdant HQ");
        assert!(directory.current_server().is_none());

        // The seed list was written through, so a reload sees it too.
        let reloaded = open_directory(&dir);
        assert_eq!(reloaded.servers(), directory.servers());
    }

    #[test]
    fn create_appends_without_selecting() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = open_directory(&dir);

        let server = directory.create_server("Test", None, None).unwrap();
        assert_eq!(directory.servers().last().map(|s| s.id.as_str()), Some(server.id.as_str()));
        assert!(directory.current_server().is_none());
    }

    #[test]
    fn join_accepts_valid_invite() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = open_directory(&dir);

        let code = InviteToken::create("Night Owls", None).encode();
        let server = directory.join_server(&code).unwrap();
        assert_eq!(server.name, "Night Owls");
        assert!(directory.contains(&server.id));
    }

    #[test]
    fn join_rejects_empty_and_malformed_invites() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = open_directory(&dir);
        let before = directory.servers().len();

        assert!(matches!(
            directory.join_server(""),
            Err(StoreError::InvalidInvite(_))
        ));
        assert!(matches!(
            directory.join_server("not a real invite"),
            Err(StoreError::InvalidInvite(_))
        ));
        assert_eq!(directory.servers().len(), before);
    }

    #[test]
    fn select_requires_existing_server() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = open_directory(&dir);

        assert!(matches!(
            directory.select_server(Some("nope")),
            Err(StoreError::NotFound)
        ));
        assert!(directory.current_server().is_none());

        directory.select_server(Some("2")).unwrap();
        assert_eq!(directory.current_server_id(), Some("2"));

        // The empty string means "no selection", same as None.
        directory.select_server(Some("")).unwrap();
        assert!(directory.current_server_id().is_none());
    }

    #[test]
    fn leave_cascades_selection_to_first_remaining() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = open_directory(&dir);

        directory.select_server(Some("1")).unwrap();
        directory.leave_server("1").unwrap();
        assert_eq!(directory.current_server_id(), Some("2"));

        // Leaving a non-selected server keeps the selection.
        directory.leave_server("4").unwrap();
        assert_eq!(directory.current_server_id(), Some("2"));
    }

    #[test]
    fn leave_last_server_clears_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = open_directory(&dir);

        directory.select_server(Some("1")).unwrap();
        for id in ["2", "3", "4", "1"] {
            directory.leave_server(id).unwrap();
        }
        assert!(directory.servers().is_empty());
        assert!(directory.current_server_id().is_none());

        // "No selection" survives the reload distinctly.
        let reloaded = open_directory(&dir);
        assert!(reloaded.servers().is_empty());
        assert!(reloaded.current_server_id().is_none());
    }

    #[test]
    fn leave_unknown_server_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = open_directory(&dir);

        assert!(matches!(
            directory.leave_server("ghost"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn resolve_selection_prefers_current_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = open_directory(&dir);

        directory.select_server(Some("3")).unwrap();
        assert_eq!(
            directory.resolve_selection(None).map(|s| s.id.as_str()),
            Some("3")
        );
        assert_eq!(
            directory.resolve_selection(Some("3")).map(|s| s.id.as_str()),
            Some("3")
        );
        // A different id falls back to lookup by id.
        assert_eq!(
            directory.resolve_selection(Some("2")).map(|s| s.id.as_str()),
            Some("2")
        );
        assert!(directory.resolve_selection(Some("ghost")).is_none());
    }

    #[test]
    fn selection_round_trips_through_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = open_directory(&dir);

        directory.select_server(Some("2")).unwrap();
        let servers = directory.servers().to_vec();

        let reloaded = open_directory(&dir);
        assert_eq!(reloaded.servers(), servers.as_slice());
        assert_eq!(reloaded.current_server_id(), Some("2"));
    }
}
