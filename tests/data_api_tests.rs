//! DataApi request shapes and argument validation

mod common;

use common::*;
use lattice::prelude::*;
use reqwest::Method;
use tokio_test::{assert_err, assert_ok};

fn entity(values: &[&str]) -> Entity {
    let mut entity = Entity::new();
    entity.insert(
        PROPERTY_TYPE_ID.to_string(),
        values.iter().map(|v| json!(v)).collect(),
    );
    entity
}

// =============================================================================
// Entity set data
// =============================================================================

mod entity_set_data {
    use super::*;

    #[tokio::test]
    async fn test_posts_sync_ids_and_properties() -> anyhow::Result<()> {
        let (client, mock) = client();
        mock.respond_json(json!([{ "id": ["1"] }]));

        let data = client
            .data()
            .get_entity_set_data(ENTITY_SET_ID, &[SYNC_ID], &[PROPERTY_TYPE_ID])
            .await?;
        assert_eq!(data, json!([{ "id": ["1"] }]));

        let request = mock.single_request();
        assert_eq!(request.api, ApiName::Data);
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), format!("entitydata/{ENTITY_SET_ID}"));
        assert_eq!(
            request.json_body(),
            Some(&json!({ "syncIds": [SYNC_ID], "properties": [PROPERTY_TYPE_ID] }))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_filters_are_sent_as_empty_arrays() {
        let (client, mock) = client();
        assert_ok!(client.data().get_entity_set_data(ENTITY_SET_ID, &[], &[]).await);
        assert_eq!(
            mock.single_request().json_body(),
            Some(&json!({ "syncIds": [], "properties": [] }))
        );
    }

    #[tokio::test]
    async fn test_rejects_invalid_ids_without_sending() {
        let (client, mock) = client();
        let data = client.data();

        assert_invalid_parameter(
            data.get_entity_set_data("not-a-uuid", &[], &[]).await,
            "entitySetId must be a valid UUID",
        );
        assert_invalid_parameter(
            data.get_entity_set_data(ENTITY_SET_ID, &["nope"], &[]).await,
            "syncIds must be an array of valid UUIDs",
        );
        assert_invalid_parameter(
            data.get_entity_set_data(ENTITY_SET_ID, &[], &["nope"]).await,
            "propertyTypeIds must be a non-empty array of valid UUIDs",
        );
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_entity_set_size() {
        let (client, mock) = client();
        mock.respond(200, "42");

        let size = client.data().get_entity_set_size(ENTITY_SET_ID).await.unwrap();
        assert_eq!(size, 42);
        assert_eq!(
            mock.single_request().path(),
            format!("entitydata/{ENTITY_SET_ID}/count")
        );
    }

    #[tokio::test]
    async fn test_single_entity() {
        let (client, mock) = client();
        mock.respond_json(json!({ PROPERTY_TYPE_ID: ["a"] }));

        let value = client
            .data()
            .get_entity_data(ENTITY_SET_ID, ORGANIZATION_ID)
            .await
            .unwrap();
        assert_eq!(value[PROPERTY_TYPE_ID], json!(["a"]));

        let request = mock.single_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path(), format!("entitydata/{ENTITY_SET_ID}/{ORGANIZATION_ID}"));
    }
}

// =============================================================================
// Download URL
// =============================================================================

mod file_url {
    use super::*;

    #[test]
    fn test_builds_url_with_token() {
        let (client, mock) = client();
        let url = client
            .data()
            .get_entity_set_data_file_url(ENTITY_SET_ID, "csv")
            .unwrap();
        assert_eq!(
            url,
            format!(
                "{BASE_URL}/datastore/data/entitydata/{ENTITY_SET_ID}?fileType=csv&token={TOKEN}"
            )
        );
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_accepts_upper_case_file_type() {
        let (client, _) = client();
        let url = client
            .data()
            .get_entity_set_data_file_url(ENTITY_SET_ID, "JSON")
            .unwrap();
        assert!(url.contains("fileType=json"));
    }

    #[test]
    fn test_returns_none_for_invalid_input() {
        let (client, _) = client();
        let data = client.data();
        assert!(data.get_entity_set_data_file_url("invalid", "csv").is_none());
        assert!(data.get_entity_set_data_file_url(ENTITY_SET_ID, "xml").is_none());
        assert!(data.get_entity_set_data_file_url(ENTITY_SET_ID, "Csv").is_none());
    }

    #[test]
    fn test_returns_none_without_token() {
        let mock = MockHttpClient::new();
        let client = LatticeClient::with_http_client(Configuration::new(BASE_URL).unwrap(), mock);
        assert!(
            client
                .data()
                .get_entity_set_data_file_url(ENTITY_SET_ID, "csv")
                .is_none()
        );
    }
}

// =============================================================================
// Writes and sync tickets
// =============================================================================

mod writes {
    use super::*;

    #[tokio::test]
    async fn test_create_entity_data() {
        let (client, mock) = client();
        let mut entities = EntityData::new();
        entities.insert("row-1".to_string(), entity(&["Alice"]));

        assert_ok!(
            client
                .data()
                .create_entity_data(ENTITY_SET_ID, SYNC_ID, &entities)
                .await
        );

        let request = mock.single_request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path(), format!("entitydata/{ENTITY_SET_ID}/{SYNC_ID}"));
        assert_eq!(
            request.json_body(),
            Some(&json!({ "row-1": { PROPERTY_TYPE_ID: ["Alice"] } }))
        );
    }

    #[tokio::test]
    async fn test_create_entity_data_rejects_empty_or_malformed_entities() {
        let (client, mock) = client();
        assert_invalid_parameter(
            client
                .data()
                .create_entity_data(ENTITY_SET_ID, SYNC_ID, &EntityData::new())
                .await,
            "entities must be a non-empty object",
        );

        let mut entities = EntityData::new();
        let mut bad = Entity::new();
        bad.insert("name".to_string(), vec![json!("Alice")]);
        entities.insert("row-1".to_string(), bad);
        assert_err!(
            client
                .data()
                .create_entity_data(ENTITY_SET_ID, SYNC_ID, &entities)
                .await
        );
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_sync_ticket_lifecycle() -> anyhow::Result<()> {
        let (client, mock) = client();
        mock.respond(200, TICKET_ID);

        let data = client.data();
        let ticket = data.acquire_sync_ticket(ENTITY_SET_ID, SYNC_ID).await?;
        assert_eq!(ticket.to_string(), TICKET_ID);

        let mut entities = EntityData::new();
        entities.insert("row-1".to_string(), entity(&["Alice", "Al"]));
        data.store_entity_data(TICKET_ID, SYNC_ID, &entities).await?;
        data.release_sync_ticket(TICKET_ID).await?;

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path(), format!("ticket/{ENTITY_SET_ID}/{SYNC_ID}"));
        assert_eq!(requests[1].method, Method::PATCH);
        assert_eq!(requests[1].path(), format!("entitydata/ticket/{TICKET_ID}/{SYNC_ID}"));
        assert_eq!(requests[2].method, Method::DELETE);
        assert_eq!(requests[2].path(), format!("ticket/{TICKET_ID}"));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_or_merge_returns_entity_key_ids() {
        let (client, mock) = client();
        mock.respond_json(json!([ORGANIZATION_ID]));

        let ids = client
            .data()
            .create_or_merge_entity_data(ENTITY_SET_ID, &[entity(&["Alice"])])
            .await
            .unwrap();
        assert_eq!(ids.len(), 1);

        let request = mock.single_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "set");
        assert_eq!(
            request.query,
            vec![("setId".to_string(), ENTITY_SET_ID.to_string())]
        );
    }

    #[tokio::test]
    async fn test_replace_entity_data_sets_update_type() {
        let (client, mock) = client();
        mock.respond(200, "1");
        mock.respond(200, "1");

        let mut entities = EntityData::new();
        entities.insert(ORGANIZATION_ID.to_string(), entity(&["Bob"]));
        let data = client.data();
        assert_eq!(data.replace_entity_data(ENTITY_SET_ID, &entities, true).await.unwrap(), 1);
        assert_eq!(data.replace_entity_data(ENTITY_SET_ID, &entities, false).await.unwrap(), 1);

        let requests = mock.requests();
        assert_eq!(requests[0].path(), format!("set/{ENTITY_SET_ID}"));
        assert_eq!(
            requests[0].query,
            vec![("type".to_string(), "PartialReplace".to_string())]
        );
        assert_eq!(
            requests[1].query,
            vec![("type".to_string(), "Replace".to_string())]
        );
    }

    #[tokio::test]
    async fn test_replace_requires_entity_key_ids() {
        let (client, mock) = client();
        let mut entities = EntityData::new();
        entities.insert("row-1".to_string(), entity(&["Bob"]));

        assert_invalid_parameter(
            client.data().replace_entity_data(ENTITY_SET_ID, &entities, true).await,
            "entities must be keyed by valid entity key ids",
        );
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_entity_data_dedups_ids() {
        let (client, mock) = client();
        mock.respond(200, "1");

        let deleted = client
            .data()
            .delete_entity_data(
                ENTITY_SET_ID,
                &[ORGANIZATION_ID, ORGANIZATION_ID],
                DeleteType::Hard,
            )
            .await
            .unwrap();
        assert_eq!(deleted, 1);

        let request = mock.single_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.query, vec![("type".to_string(), "Hard".to_string())]);
        assert_eq!(request.json_body(), Some(&json!([ORGANIZATION_ID])));
    }
}

// =============================================================================
// Failures
// =============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_non_success_status_is_an_http_error() {
        let (client, mock) = client();
        mock.respond(403, "forbidden");

        let err = client
            .data()
            .acquire_sync_ticket(ENTITY_SET_ID, SYNC_ID)
            .await
            .unwrap_err();
        match &err {
            LatticeError::Http { api, status, body } => {
                assert_eq!(*api, ApiName::Data);
                assert_eq!(*status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.status(), Some(403));
        assert!(!err.is_local());
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        let (client, mock) = client();
        mock.fail(LatticeError::NotImplemented("offline"));

        let result = client.data().release_sync_ticket(TICKET_ID).await;
        assert!(matches!(result, Err(LatticeError::NotImplemented("offline"))));
    }
}

// =============================================================================
// Entity and association graphs
// =============================================================================

mod graphs {
    use super::*;

    const ASSOCIATION_SET_ID: &str = "a680a1d8-73fb-423c-abd2-fd71965693d2";

    fn graph() -> DataGraph {
        DataGraph::from_plain_record(&json!({
            "entities": {
                ENTITY_SET_ID: [
                    { PROPERTY_TYPE_ID: ["a"] },
                    { PROPERTY_TYPE_ID: ["b"] },
                ],
            },
            "associations": {
                ASSOCIATION_SET_ID: [{
                    "srcEntitySetId": ENTITY_SET_ID,
                    "srcEntityIndex": 0,
                    "dstEntitySetId": ENTITY_SET_ID,
                    "dstEntityIndex": 1,
                    "data": { PROPERTY_TYPE_ID: ["since 2020"] },
                }],
            },
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_graph_is_posted_to_the_api_root() -> anyhow::Result<()> {
        let (client, mock) = client();
        mock.respond_json(json!({ "entityKeyIds": {}, "associationEntityKeyIds": {} }));

        client.data().create_entity_and_association_data(&graph()).await?;

        let request = mock.single_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "");
        let body = request.json_body().unwrap();
        assert_eq!(body["entities"][ENTITY_SET_ID][1], json!({ PROPERTY_TYPE_ID: ["b"] }));
        assert_eq!(
            body["associations"][ASSOCIATION_SET_ID][0],
            json!({
                "srcEntitySetId": ENTITY_SET_ID,
                "srcEntityIndex": 0,
                "dstEntitySetId": ENTITY_SET_ID,
                "dstEntityIndex": 1,
                "data": { PROPERTY_TYPE_ID: ["since 2020"] },
            })
        );
        Ok(())
    }

    #[test]
    fn test_graph_rejects_index_past_its_entities() {
        let err = DataGraph::from_plain_record(&json!({
            "entities": { ENTITY_SET_ID: [{ PROPERTY_TYPE_ID: ["a"] }] },
            "associations": {
                ASSOCIATION_SET_ID: [{
                    "srcEntitySetId": ENTITY_SET_ID,
                    "srcEntityIndex": 0,
                    "dstEntitySetId": ENTITY_SET_ID,
                    "dstEntityIndex": 3,
                }],
            },
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("associations"));
    }
}

// =============================================================================
// Concurrency
// =============================================================================

mod concurrency {
    use super::*;
    use futures::future::join_all;

    #[tokio::test]
    async fn test_cloned_apis_share_one_transport() {
        let (client, mock) = client();
        let data = client.data();

        let calls = (0..8).map(|_| {
            let data = data.clone();
            async move { data.get_entity_set_size(ENTITY_SET_ID).await }
        });
        let results = join_all(calls).await;

        // empty bodies decode as null, which is not a count
        assert!(results.iter().all(|r| matches!(r, Err(LatticeError::Decode(_)))));
        assert_eq!(mock.request_count(), 8);
    }

    #[tokio::test]
    async fn test_apis_can_move_across_tasks() {
        let (client, mock) = client();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let organizations = client.organizations();
                tokio::spawn(async move {
                    organizations
                        .add_member_to_organization(ORGANIZATION_ID, "auth0|123")
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert_ok!(handle.await.unwrap());
        }
        assert_eq!(mock.request_count(), 4);
    }
}
