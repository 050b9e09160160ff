//! Interactive session loop.
//!
//! Drives the read-dispatch cycle for one connected terminal: banner on
//! attach, two background inventory prefetches, then logical lines from
//! the editor routed through the command dispatcher until the peer
//! quits or the transport fails. Each session exclusively owns its
//! state; the only cross-task sharing is the read-only inventory
//! snapshot published by the prefetch cells.

use std::sync::Arc;

use tracing::{debug, info, warn};

use gatehouse_core::config::SessionOptions;
use gatehouse_core::constants::{
    CLEAR_SCREEN, MIN_ADDRESS_WIDTH, MIN_COMMENT_WIDTH, MIN_GROUP_ID_WIDTH, MIN_ID_WIDTH,
    MIN_LOGIN_WIDTH, MIN_MEMBERS_WIDTH, MIN_NAME_WIDTH,
};
use gatehouse_core::error::Result;
use gatehouse_core::forward::Forwarder;
use gatehouse_core::inventory::{
    sort_resources, InventoryService, Prefetch, Resource, ResourceGroup,
};
use gatehouse_core::render::{primary, render_table, title, warning, Align, Column};
use gatehouse_core::resolver::resolve;
use gatehouse_core::terminal::{LineEditor, Terminal};

use crate::dispatch::Command;

/// Session lifecycle phase. Transitions are forward-only; `Closed` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Terminal attached; banner and prefetches starting.
    Attached,
    /// Read-dispatch cycle running.
    Active,
    /// Session over; state released.
    Closed,
}

impl SessionPhase {
    /// Whether the read-dispatch cycle is running.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionPhase::Active)
    }

    /// Whether the session has terminated.
    pub fn is_closed(&self) -> bool {
        matches!(self, SessionPhase::Closed)
    }
}

/// Why the read-dispatch cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    /// The user asked to quit.
    Quit,
    /// The peer closed the connection.
    Disconnected,
}

/// One interactive gateway session.
///
/// Created when a terminal attaches, destroyed when the connection
/// closes. Owns the edit buffer, the inventory snapshots, and the
/// current search result used for numeric disambiguation.
pub struct InteractiveSession<T: Terminal> {
    term: T,
    user: String,
    options: SessionOptions,
    inventory: Arc<dyn InventoryService>,
    forwarder: Arc<dyn Forwarder>,
    resources: Prefetch<Vec<Resource>>,
    groups: Prefetch<Vec<ResourceGroup>>,
    editor: LineEditor,
    search_result: Vec<Resource>,
    phase: SessionPhase,
}

impl<T: Terminal + 'static> InteractiveSession<T> {
    /// Attach a terminal and start the background inventory prefetches.
    pub fn new(
        term: T,
        user: impl Into<String>,
        options: SessionOptions,
        inventory: Arc<dyn InventoryService>,
        forwarder: Arc<dyn Forwarder>,
    ) -> Self {
        let user = user.into();
        let resources = Prefetch::spawn(load_resources(Arc::clone(&inventory), user.clone()));
        let groups = Prefetch::spawn(load_groups(Arc::clone(&inventory), user.clone()));
        Self {
            term,
            user,
            options,
            inventory,
            forwarder,
            resources,
            groups,
            editor: LineEditor::new(),
            search_result: Vec::new(),
            phase: SessionPhase::Attached,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Run the session to completion.
    ///
    /// Returns `Ok` on quit or peer disconnect; transport faults are
    /// logged and propagated.
    pub async fn run(mut self) -> Result<()> {
        info!(user = %self.user, "Interactive session attached");

        let outcome = self.serve().await;
        self.phase = SessionPhase::Closed;

        match outcome {
            Ok(reason) => {
                info!(user = %self.user, reason = ?reason, "Interactive session closed");
                Ok(())
            }
            Err(e) if e.is_disconnect() => {
                info!(user = %self.user, "Peer disconnected");
                Ok(())
            }
            Err(e) => {
                warn!(user = %self.user, error = %e, "Interactive session failed");
                Err(e)
            }
        }
    }

    async fn serve(&mut self) -> Result<ExitReason> {
        self.display_banner().await?;
        self.phase = SessionPhase::Active;

        loop {
            self.show_prompt().await?;
            let line = match self.editor.read_line(&mut self.term).await {
                Ok(line) => line,
                Err(e) if e.is_disconnect() => return Ok(ExitReason::Disconnected),
                Err(e) => return Err(e),
            };
            debug!(user = %self.user, line = %line, "Dispatching input");
            match Command::parse(&line) {
                Command::Noop => {}
                Command::Search(query) => self.search_and_display(&query).await?,
                Command::ListResources => self.search_and_display("").await?,
                Command::ListGroups => self.display_groups().await?,
                Command::GroupMembers(index) => self.display_group_members(index).await?,
                Command::Help => self.display_banner().await?,
                Command::Quit => return Ok(ExitReason::Quit),
                Command::Connect(token) => self.connect_or_display(&token).await?,
            }
        }
    }

    // =========================================================================
    // Display handlers
    // =========================================================================

    async fn display_banner(&mut self) -> Result<()> {
        self.term.write_all(CLEAR_SCREEN).await?;
        let heading = title(&format!(
            "{}, welcome to the gatehouse access gateway",
            self.user
        ));
        let banner = format!(
            concat!(
                "\r\n {heading}\r\n\r\n",
                " 1) Enter an {id}, or part of a hostname, address or comment, to connect when unique.\r\n",
                " 2) Enter {slash} plus hostname, address or comment to search. e.g. /web\r\n",
                " 3) Enter {p} to list the resources you may access.\r\n",
                " 4) Enter {g} to list your resource groups.\r\n",
                " 5) Enter {gn} to list the members of that group. e.g. g1\r\n",
                " 9) Enter {h} to show this menu again.\r\n",
                " 0) Enter {q} to quit.\r\n",
            ),
            heading = heading,
            id = primary("ID"),
            slash = primary("/"),
            p = primary("p/P"),
            g = primary("g/G"),
            gn = primary("g + group ID"),
            h = primary("h/H"),
            q = primary("q/Q"),
        );
        self.term.write_all(banner.as_bytes()).await
    }

    async fn show_prompt(&mut self) -> Result<()> {
        let prompt = format!("\r\n{}", self.options.prompt);
        self.term.write_all(prompt.as_bytes()).await
    }

    async fn search_and_display(&mut self, query: &str) -> Result<()> {
        let snapshot = self.resources_snapshot().await;
        let result = resolve(query, &snapshot, &self.search_result, &self.options.search);
        self.display_result(result).await
    }

    /// Sort, store as the current search result, and render.
    ///
    /// The stored ordering defines the 1-based numeric IDs a follow-up
    /// token may use, so it must match what was displayed.
    async fn display_result(&mut self, mut result: Vec<Resource>) -> Result<()> {
        sort_resources(&mut result, self.options.sort_key);
        self.search_result = result;

        let rows: Vec<(usize, Resource)> = self
            .search_result
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, r)| (i + 1, r))
            .collect();
        let table = render_table(&resource_columns(), &rows, self.options.term_width);
        self.term.write_all(table.as_bytes()).await
    }

    async fn display_groups(&mut self) -> Result<()> {
        let groups = self.groups_snapshot().await;
        let rows: Vec<(usize, ResourceGroup)> = groups
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, g)| (i + 1, g))
            .collect();
        let table = render_table(&group_columns(), &rows, self.options.term_width);
        self.term.write_all(table.as_bytes()).await
    }

    async fn display_group_members(&mut self, index: usize) -> Result<()> {
        let groups = self.groups_snapshot().await;
        // Out-of-range indexes render the empty notice, never an error.
        let members = match index.checked_sub(1).and_then(|i| groups.get(i)) {
            Some(group) => group.members.clone(),
            None => Vec::new(),
        };
        self.display_result(members).await
    }

    // =========================================================================
    // Connect path
    // =========================================================================

    async fn connect_or_display(&mut self, token: &str) -> Result<()> {
        let snapshot = self.resources_snapshot().await;
        let mut result = resolve(token, &snapshot, &self.search_result, &self.options.search);
        if result.len() == 1 {
            let resource = result.remove(0);
            return self.hand_off(resource).await;
        }
        self.display_result(result).await
    }

    async fn hand_off(&mut self, resource: Resource) -> Result<()> {
        let Some(identity) = resource.identities.first().cloned() else {
            warn!(host = %resource.hostname, "Resource has no eligible login identity");
            let notice = format!(
                "{}\r\n",
                warning(&format!(
                    "No login identity configured for {}",
                    resource.hostname
                ))
            );
            return self.term.write_all(notice.as_bytes()).await;
        };

        info!(
            host = %resource.hostname,
            identity = %identity,
            "Handing session off to forwarder"
        );
        match self
            .forwarder
            .connect(&resource, &identity, &mut self.term)
            .await
        {
            Ok(()) => {
                debug!(host = %resource.hostname, "Forwarded session ended");
                Ok(())
            }
            Err(e) if e.is_disconnect() => Err(e),
            Err(e) => {
                warn!(host = %resource.hostname, error = %e, "Forward hand-off failed");
                let notice = format!("{}\r\n", warning(&e.to_string()));
                self.term.write_all(notice.as_bytes()).await
            }
        }
    }

    // =========================================================================
    // Inventory snapshots
    // =========================================================================

    async fn resources_snapshot(&self) -> Arc<Vec<Resource>> {
        let inventory = Arc::clone(&self.inventory);
        let user = self.user.clone();
        self.resources
            .get_or_fetch(move || load_resources(inventory, user))
            .await
    }

    async fn groups_snapshot(&self) -> Arc<Vec<ResourceGroup>> {
        let inventory = Arc::clone(&self.inventory);
        let user = self.user.clone();
        self.groups
            .get_or_fetch(move || load_groups(inventory, user))
            .await
    }
}

/// Fetch the resource snapshot, degrading fetch failures to an empty
/// set so the session keeps serving.
async fn load_resources(inventory: Arc<dyn InventoryService>, user: String) -> Vec<Resource> {
    match inventory.fetch_resources(&user).await {
        Ok(resources) => resources,
        Err(e) => {
            warn!(user = %user, error = %e, "Resource fetch failed; treating as empty");
            Vec::new()
        }
    }
}

/// Fetch the group snapshot with the same empty-set degradation.
async fn load_groups(inventory: Arc<dyn InventoryService>, user: String) -> Vec<ResourceGroup> {
    match inventory.fetch_resource_groups(&user).await {
        Ok(groups) => groups,
        Err(e) => {
            warn!(user = %user, error = %e, "Group fetch failed; treating as empty");
            Vec::new()
        }
    }
}

// =============================================================================
// Listing Columns
// =============================================================================

fn resource_columns() -> Vec<Column<(usize, Resource)>> {
    vec![
        Column {
            header: "ID",
            min_width: MIN_ID_WIDTH,
            align: Align::Right,
            field: |row| row.0.to_string(),
        },
        Column {
            header: "Hostname",
            min_width: MIN_NAME_WIDTH,
            align: Align::Left,
            field: |row| row.1.hostname.clone(),
        },
        Column {
            header: "Address",
            min_width: MIN_ADDRESS_WIDTH,
            align: Align::Left,
            field: |row| row.1.address.clone(),
        },
        Column {
            header: "LoginAs",
            min_width: MIN_LOGIN_WIDTH,
            align: Align::Left,
            field: |row| row.1.login_summary(),
        },
        Column {
            header: "Comment",
            min_width: MIN_COMMENT_WIDTH,
            align: Align::Left,
            field: |row| row.1.comment.clone(),
        },
    ]
}

fn group_columns() -> Vec<Column<(usize, ResourceGroup)>> {
    vec![
        Column {
            header: "ID",
            min_width: MIN_GROUP_ID_WIDTH,
            align: Align::Right,
            field: |row| row.0.to_string(),
        },
        Column {
            header: "Name",
            min_width: MIN_NAME_WIDTH,
            align: Align::Left,
            field: |row| row.1.name.clone(),
        },
        Column {
            header: "Members",
            min_width: MIN_MEMBERS_WIDTH,
            align: Align::Left,
            field: |row| row.1.member_count().to_string(),
        },
        Column {
            header: "Comment",
            min_width: MIN_COMMENT_WIDTH,
            align: Align::Left,
            field: |row| row.1.comment.clone(),
        },
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_helpers() {
        assert!(!SessionPhase::Attached.is_active());
        assert!(SessionPhase::Active.is_active());
        assert!(!SessionPhase::Active.is_closed());
        assert!(SessionPhase::Closed.is_closed());
    }

    #[test]
    fn resource_columns_cover_listing_fields() {
        let headers: Vec<&str> = resource_columns().iter().map(|c| c.header).collect();
        assert_eq!(headers, ["ID", "Hostname", "Address", "LoginAs", "Comment"]);
    }

    #[test]
    fn group_columns_cover_listing_fields() {
        let headers: Vec<&str> = group_columns().iter().map(|c| c.header).collect();
        assert_eq!(headers, ["ID", "Name", "Members", "Comment"]);
    }
}
