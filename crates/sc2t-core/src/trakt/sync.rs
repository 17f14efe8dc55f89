//! Create-or-update synchronization of one named list.
//!
//! Lists are matched by exact, case-sensitive name. Renaming the list on the
//! service, or a second list with the same name, breaks that match: the next
//! run creates a new list or picks the first same-named one. A stable external
//! identifier would be sturdier, but name matching is what existing lists rely on.

use chrono::NaiveDateTime;

use super::{AddedItems, ApiError, RemoteList, TraktClient};
use crate::http::Transport;
use crate::scrape::ListDescriptor;

/// Step of the sync that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Lookup,
    Create,
    Update,
    AddItems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    #[default]
    Apply,
    /// Look up the list only; no writes.
    DryRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// List created or updated; `items` is `None` when there was nothing to add.
    Synced {
        list_id: u64,
        action: ListAction,
        items: Option<AddedItems>,
    },
    /// Dry run: what an apply run would do.
    Planned {
        existing_id: Option<u64>,
        titles: usize,
    },
    /// A step failed; later steps were not attempted.
    Failed {
        stage: SyncStage,
        status: Option<u32>,
        message: String,
    },
}

impl SyncOutcome {
    fn failed(stage: SyncStage, name: &str, err: ApiError) -> Self {
        let what = match stage {
            SyncStage::Lookup => "look up lists for",
            SyncStage::Create => "create list",
            SyncStage::Update => "update list",
            SyncStage::AddItems => "add shows to list",
        };
        tracing::error!("failed to {} '{}': {}", what, name, err);
        SyncOutcome::Failed {
            stage,
            status: err.status(),
            message: err.to_string(),
        }
    }
}

/// First list whose name equals `name` exactly.
pub fn find_list_by_name<'a>(lists: &'a [RemoteList], name: &str) -> Option<&'a RemoteList> {
    lists.iter().find(|l| l.name == name)
}

/// Make the remote list named after `descriptor` hold `titles`.
///
/// Updates the description of an existing same-named list, or creates the list,
/// then adds every title as a show in one request. Any failed step is logged
/// and ends the sync there; nothing is rolled back.
pub fn sync_list<T: Transport>(
    client: &TraktClient<T>,
    descriptor: &ListDescriptor,
    titles: &[String],
    now: NaiveDateTime,
    mode: SyncMode,
) -> SyncOutcome {
    let name = descriptor.name.as_str();
    let description = descriptor.compose_description(now, client.footer());

    let lists = match client.lists() {
        Ok(lists) => lists,
        Err(e) => return SyncOutcome::failed(SyncStage::Lookup, name, e),
    };
    let existing = find_list_by_name(&lists, name).map(RemoteList::id);

    if mode == SyncMode::DryRun {
        return SyncOutcome::Planned {
            existing_id: existing,
            titles: titles.len(),
        };
    }

    let (list_id, action) = match existing {
        Some(id) => {
            tracing::info!("list '{}' already exists with id {}; updating", name, id);
            if let Err(e) = client.update_description(id, &description) {
                return SyncOutcome::failed(SyncStage::Update, name, e);
            }
            (id, ListAction::Updated)
        }
        None => match client.create_list(name, &description) {
            Ok(list) => {
                tracing::info!("created list '{}' with id {}", name, list.id());
                (list.id(), ListAction::Created)
            }
            Err(e) => return SyncOutcome::failed(SyncStage::Create, name, e),
        },
    };

    if titles.is_empty() {
        tracing::warn!("no titles to add to list '{}'", name);
        return SyncOutcome::Synced {
            list_id,
            action,
            items: None,
        };
    }

    match client.add_shows(list_id, titles) {
        Ok(items) => {
            tracing::info!(
                submitted = items.submitted,
                added = ?items.added,
                existing = ?items.existing,
                not_found = items.not_found.len(),
                "shows added to list '{}'",
                name
            );
            for t in &items.not_found {
                tracing::warn!("show not found on the service: {}", t);
            }
            SyncOutcome::Synced {
                list_id,
                action,
                items: Some(items),
            }
        }
        Err(e) => SyncOutcome::failed(SyncStage::AddItems, name, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TraktConfig;
    use crate::http::testing::FakeTransport;
    use crate::http::Method;
    use chrono::NaiveDate;

    const LISTS: &str = "http://api.test/users/me/lists";

    fn client(t: &FakeTransport) -> TraktClient<&FakeTransport> {
        let cfg = TraktConfig {
            base_url: "http://api.test".to_string(),
            client_id: "cid".to_string(),
            access_token: "tok".to_string(),
            ..TraktConfig::default()
        };
        TraktClient::new(t, &cfg)
    }

    fn descriptor() -> ListDescriptor {
        ListDescriptor {
            name: "Arte Shows".to_string(),
            description: "Series on Arte".to_string(),
            source_url: "https://src.test/liste/arte/1".to_string(),
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn titles() -> Vec<String> {
        vec!["Alpha".to_string(), "Beta".to_string()]
    }

    const EXISTING: &str = r#"[
        {"name": "arte shows", "ids": {"trakt": 1}},
        {"name": "Arte Shows", "ids": {"trakt": 42}}
    ]"#;

    const ADDED: &str = r#"{"added":{"shows":2},"existing":{"shows":0},"not_found":{"shows":[]}}"#;

    #[test]
    fn existing_list_is_updated_never_created() {
        let t = FakeTransport::new()
            .on(Method::Get, LISTS, 200, EXISTING)
            .on(Method::Put, &format!("{LISTS}/42"), 200, "{}")
            .on(Method::Post, &format!("{LISTS}/42/items"), 201, ADDED);
        let out = sync_list(&client(&t), &descriptor(), &titles(), now(), SyncMode::Apply);

        match out {
            SyncOutcome::Synced { list_id, action, items } => {
                assert_eq!(list_id, 42);
                assert_eq!(action, ListAction::Updated);
                assert_eq!(items.unwrap().added, Some(2));
            }
            other => panic!("expected Synced, got {other:?}"),
        }
        assert_eq!(t.count(Method::Post, "/users/me/lists"), 0);
        assert_eq!(t.count(Method::Put, "/lists/42"), 1);

        let put = t
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Put)
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(put.body.as_deref().unwrap()).unwrap();
        let description = body["description"].as_str().unwrap();
        assert!(description.starts_with("Series on Arte\n\nSource URL: https://src.test/liste/arte/1"));
        assert!(description.contains("2024-01-02 03:04:05"));
    }

    #[test]
    fn missing_list_is_created_then_filled() {
        let t = FakeTransport::new()
            .on(Method::Get, LISTS, 200, r#"[{"name": "Other", "ids": {"trakt": 1}}]"#)
            .on(Method::Post, LISTS, 201, r#"{"name":"Arte Shows","ids":{"trakt":77}}"#)
            .on(Method::Post, &format!("{LISTS}/77/items"), 201, ADDED);
        let out = sync_list(&client(&t), &descriptor(), &titles(), now(), SyncMode::Apply);

        assert!(matches!(
            out,
            SyncOutcome::Synced { list_id: 77, action: ListAction::Created, .. }
        ));
        assert_eq!(t.count(Method::Post, "/users/me/lists"), 1);
        assert_eq!(t.count(Method::Post, "/77/items"), 1);
        assert_eq!(t.count(Method::Put, ""), 0);

        let items = t.requests().last().cloned().unwrap();
        let body: serde_json::Value = serde_json::from_slice(items.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"shows": [{"title": "Alpha"}, {"title": "Beta"}]})
        );
    }

    #[test]
    fn failed_create_short_circuits_items() {
        let t = FakeTransport::new()
            .on(Method::Get, LISTS, 200, "[]")
            .on(Method::Post, LISTS, 420, r#"{"error":"list limit"}"#);
        let out = sync_list(&client(&t), &descriptor(), &titles(), now(), SyncMode::Apply);

        match out {
            SyncOutcome::Failed { stage, status, message } => {
                assert_eq!(stage, SyncStage::Create);
                assert_eq!(status, Some(420));
                assert!(message.contains("list limit"), "{message}");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(t.count(Method::Post, "/items"), 0);
    }

    #[test]
    fn failed_update_short_circuits_items() {
        let t = FakeTransport::new()
            .on(Method::Get, LISTS, 200, EXISTING)
            .on(Method::Put, &format!("{LISTS}/42"), 404, "not found");
        let out = sync_list(&client(&t), &descriptor(), &titles(), now(), SyncMode::Apply);
        assert!(matches!(
            out,
            SyncOutcome::Failed { stage: SyncStage::Update, status: Some(404), .. }
        ));
        assert_eq!(t.count(Method::Post, "/items"), 0);
    }

    #[test]
    fn failed_lookup_never_creates() {
        let t = FakeTransport::new().on(Method::Get, LISTS, 401, "unauthorized");
        let out = sync_list(&client(&t), &descriptor(), &titles(), now(), SyncMode::Apply);
        assert!(matches!(
            out,
            SyncOutcome::Failed { stage: SyncStage::Lookup, status: Some(401), .. }
        ));
        assert_eq!(t.requests().len(), 1);
    }

    #[test]
    fn failed_items_add_is_reported() {
        let t = FakeTransport::new()
            .on(Method::Get, LISTS, 200, "[]")
            .on(Method::Post, LISTS, 201, r#"{"name":"Arte Shows","ids":{"trakt":5}}"#)
            .on(Method::Post, &format!("{LISTS}/5/items"), 500, "oops");
        let out = sync_list(&client(&t), &descriptor(), &titles(), now(), SyncMode::Apply);
        assert!(matches!(
            out,
            SyncOutcome::Failed { stage: SyncStage::AddItems, status: Some(500), .. }
        ));
    }

    #[test]
    fn empty_titles_skip_items_request() {
        let t = FakeTransport::new()
            .on(Method::Get, LISTS, 200, "[]")
            .on(Method::Post, LISTS, 201, r#"{"name":"Arte Shows","ids":{"trakt":5}}"#);
        let out = sync_list(&client(&t), &descriptor(), &[], now(), SyncMode::Apply);
        assert_eq!(
            out,
            SyncOutcome::Synced { list_id: 5, action: ListAction::Created, items: None }
        );
        assert_eq!(t.count(Method::Post, "/items"), 0);
    }

    #[test]
    fn dry_run_only_looks_up() {
        let t = FakeTransport::new().on(Method::Get, LISTS, 200, EXISTING);
        let out = sync_list(&client(&t), &descriptor(), &titles(), now(), SyncMode::DryRun);
        assert_eq!(out, SyncOutcome::Planned { existing_id: Some(42), titles: 2 });
        assert_eq!(t.requests().len(), 1);
    }

    #[test]
    fn name_match_is_exact() {
        let lists: Vec<RemoteList> = serde_json::from_str(EXISTING).unwrap();
        assert_eq!(find_list_by_name(&lists, "Arte Shows").map(RemoteList::id), Some(42));
        assert_eq!(find_list_by_name(&lists, "arte shows").map(RemoteList::id), Some(1));
        assert!(find_list_by_name(&lists, "Arte Shows ").is_none());
    }
}
