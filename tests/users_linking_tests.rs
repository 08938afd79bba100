//! UsersApi and LinkingApi

mod common;

use common::*;
use lattice::models::linking::LinkingProperties;
use lattice::prelude::*;
use reqwest::Method;
use uuid::Uuid;

// =============================================================================
// Users
// =============================================================================

mod users {
    use super::*;

    #[tokio::test]
    async fn test_user_paths() -> anyhow::Result<()> {
        let (client, mock) = client();
        mock.respond_json(json!({ "user_id": "auth0|123" }));
        mock.respond_json(json!({}));
        mock.respond_json(json!([]));
        mock.respond_json(json!({}));

        let users = client.users();
        let user = users.get_user("auth0|123").await?;
        assert_eq!(user["user_id"], json!("auth0|123"));
        users.get_all_users().await?;
        users.get_all_users_for_role("admin").await?;
        users.get_all_users_for_all_roles().await?;

        let requests = mock.requests();
        assert!(requests.iter().all(|r| r.api == ApiName::Users));
        assert!(requests.iter().all(|r| r.method == Method::GET));
        let paths: Vec<_> = requests.iter().map(|r| r.path()).collect();
        assert_eq!(
            paths,
            vec!["users/auth0|123", "users", "users/roles/admin", "users/roles"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_free_form_ids_are_single_segments() {
        let (client, mock) = client();
        client.users().get_user("a/b").await.unwrap();
        client.users().get_all_users_for_role("../admin").await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].segments, vec!["users", "a/b"]);
        assert_eq!(requests[1].segments, vec!["users", "roles", "../admin"]);
    }

    #[tokio::test]
    async fn test_reset_user_roles() {
        let (client, mock) = client();
        client
            .users()
            .reset_user_roles("auth0|123", &["admin", "user", "admin"])
            .await
            .unwrap();

        let request = mock.single_request();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path(), "users/roles/reset/auth0|123");
        assert_eq!(request.json_body(), Some(&json!(["admin", "user"])));
    }

    #[tokio::test]
    async fn test_rejects_empty_user_id() {
        let (client, mock) = client();
        assert_invalid_parameter(
            client.users().get_user("").await,
            "userId must be a non-empty string",
        );
        assert_invalid_parameter(
            client.users().reset_user_roles("auth0|123", &[""]).await,
            "roles must be an array of non-empty strings",
        );
        assert_eq!(mock.request_count(), 0);
    }

    // Behavior change: these calls used to log the failure and resolve with
    // no value. They now fail like every other endpoint.
    #[tokio::test]
    async fn test_failed_request_is_an_error_not_an_empty_value() {
        let (client, mock) = client();
        mock.respond(404, "");

        let result = client.users().get_user("auth0|missing").await;
        assert!(matches!(
            result,
            Err(LatticeError::Http { status: 404, .. })
        ));
    }
}

// =============================================================================
// Linking
// =============================================================================

mod linking {
    use super::*;

    fn entity_type() -> EntityType {
        EntityType::builder()
            .set_type(FullyQualifiedName::parse("linking.person").unwrap())
            .set_title("Linked person")
            .unwrap()
            .set_property_types([PROPERTY_TYPE_ID])
            .unwrap()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_linking_entity_type() -> anyhow::Result<()> {
        let (client, mock) = client();
        mock.respond(200, ENTITY_TYPE_ID);

        let linking_entity_type = LinkingEntityType::builder()
            .set_entity_type(entity_type())
            .set_entity_type_ids([ENTITY_TYPE_ID, ENTITY_TYPE_ID])?
            .build()?;
        let id = client
            .linking()
            .create_linking_entity_type(&linking_entity_type)
            .await?;
        assert_eq!(id.to_string(), ENTITY_TYPE_ID);

        let request = mock.single_request();
        assert_eq!(request.api, ApiName::Linking);
        assert_eq!(request.path(), "type");
        let body = request.json_body().unwrap();
        assert_eq!(body["entityTypeIds"], json!([ENTITY_TYPE_ID]));
        assert_eq!(body["deidentified"], json!(false));
        Ok(())
    }

    #[tokio::test]
    async fn test_link_entity_sets() -> anyhow::Result<()> {
        let (client, mock) = client();
        mock.respond(200, ENTITY_SET_ID);

        let entity_set = EntitySet::builder()
            .set_entity_type_id(ENTITY_TYPE_ID)?
            .set_name("linked_people")?
            .set_title("Linked people")?
            .build()?;
        let mut properties = LinkingProperties::new();
        properties.insert(
            Uuid::parse_str(ENTITY_SET_ID)?,
            Uuid::parse_str(PROPERTY_TYPE_ID)?,
        );
        let linking_entity_set = LinkingEntitySet::builder()
            .set_entity_set(entity_set)
            .set_linking_properties([properties])?
            .build()?;

        client.linking().link_entity_sets(&linking_entity_set).await?;

        let request = mock.single_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "set");
        assert_eq!(
            request.json_body().unwrap()["linkingProperties"],
            json!([{ ENTITY_SET_ID: PROPERTY_TYPE_ID }])
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_entity_level_linking_is_not_implemented() {
        let (client, mock) = client();
        let linking = client.linking();

        let results = [
            linking.link_entities().await,
            linking.set_linked_entities().await,
            linking.remove_linked_entities().await,
            linking.add_linked_entities().await,
            linking.remove_linked_entity().await,
        ];
        for result in results {
            let err = result.unwrap_err();
            assert!(matches!(err, LatticeError::NotImplemented(_)));
            assert!(err.is_local());
        }
        assert_eq!(mock.request_count(), 0);

        let message = linking.link_entities().await.unwrap_err().to_string();
        assert_eq!(message, "LinkingApi.linkEntities() is not implemented");
    }
}
