//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: resource call → HTTP requests → typed records

use futures::{StreamExt, TryStreamExt};
use killbill_client::http::{
    ClientConfig, HttpClient, RequestOptions, CREATED_BY_HEADER, REASON_HEADER,
};
use killbill_client::models::{Account, Catalog, CustomField, TagDefinition, Tenant};
use killbill_client::pagination::{
    MAX_NB_RECORDS_HEADER, NEXT_PAGE_URI_HEADER, TOTAL_NB_RECORDS_HEADER,
};
use killbill_client::Error;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNTS_PAGINATION: &str = "/1.0/kb/accounts/pagination";

fn client_for(server: &MockServer) -> HttpClient {
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .basic_auth("admin", "password")
        .tenant("bob", "lazar")
        .build();
    HttpClient::new(config).unwrap()
}

fn account(id: &str) -> serde_json::Value {
    json!({"accountId": id, "name": format!("Account {id}"), "currency": "USD"})
}

/// Mount a two-page account collection: a1, a2 then a3
async fn mount_account_pages(server: &MockServer, second_page_calls: u64) {
    let next = format!("{}{ACCOUNTS_PAGINATION}?offset=2&limit=2", server.uri());

    Mock::given(method("GET"))
        .and(path(ACCOUNTS_PAGINATION))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .and(header("X-Killbill-ApiKey", "bob"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(TOTAL_NB_RECORDS_HEADER, "3")
                .insert_header(MAX_NB_RECORDS_HEADER, "3")
                .insert_header(NEXT_PAGE_URI_HEADER, next.as_str())
                .set_body_json(json!([account("a1"), account("a2")])),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(ACCOUNTS_PAGINATION))
        .and(query_param("offset", "2"))
        .and(header("X-Killbill-ApiKey", "bob"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(TOTAL_NB_RECORDS_HEADER, "3")
                .insert_header(MAX_NB_RECORDS_HEADER, "3")
                .set_body_json(json!([account("a3")])),
        )
        .expect(second_page_calls)
        .mount(server)
        .await;
}

fn ids(accounts: &[Account]) -> Vec<&str> {
    accounts
        .iter()
        .filter_map(|a| a.account_id.as_deref())
        .collect()
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_account_create_follows_location() {
    let mock_server = MockServer::start().await;
    let location = format!("{}/1.0/kb/accounts/a1", mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/1.0/kb/accounts"))
        .and(header(CREATED_BY_HEADER, "admin"))
        .and(header(REASON_HEADER, "signup"))
        .and(body_partial_json(json!({"name": "John Doe", "externalKey": "ext-1"})))
        .respond_with(ResponseTemplate::new(201).insert_header("Location", location.as_str()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/accounts/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accountId": "a1",
            "name": "John Doe",
            "externalKey": "ext-1",
            "currency": "USD"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let new_account = Account {
        name: Some("John Doe".to_string()),
        external_key: Some("ext-1".to_string()),
        currency: Some("USD".to_string()),
        ..Default::default()
    };
    let options = RequestOptions::audited("admin").reason("signup");

    let created = new_account.create(&client, &options).await.unwrap();
    assert_eq!(created.account_id.as_deref(), Some("a1"));
    assert_eq!(created.external_key.as_deref(), Some("ext-1"));
}

#[tokio::test]
async fn test_account_find_by_id_with_balance() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/accounts/a1"))
        .and(query_param("accountWithBalance", "true"))
        .and(query_param("accountWithBalanceAndCBA", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accountId": "a1",
            "accountBalance": 12.5,
            "accountCBA": 0.0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let found = Account::find_by_id(&client, "a1", true, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(found.account_balance, Some(12.5));
    assert_eq!(found.account_cba, Some(0.0));
}

#[tokio::test]
async fn test_account_find_by_external_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/accounts"))
        .and(query_param("externalKey", "ext-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account("a1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let found = Account::find_by_external_key(&client, "ext-1", &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(found.account_id.as_deref(), Some("a1"));
}

#[tokio::test]
async fn test_account_find_in_batches_single_page() {
    let mock_server = MockServer::start().await;
    mount_account_pages(&mock_server, 0).await;

    let client = client_for(&mock_server);
    let page = Account::find_in_batches(&client, 0, 2, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(ids(&page.records), vec!["a1", "a2"]);
    assert_eq!(page.total_nb_records(), 3);
    assert!(page.has_next_page());
}

#[tokio::test]
async fn test_account_search_key_is_path_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/accounts/search/John%20Doe"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(TOTAL_NB_RECORDS_HEADER, "1")
                .set_body_json(json!([account("a1")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page =
        Account::find_in_batches_by_search_key(&client, "John Doe", 0, 10, &RequestOptions::new())
            .await
            .unwrap();

    assert_eq!(page.len(), 1);
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn test_account_find_all_walks_every_page() {
    let mock_server = MockServer::start().await;
    mount_account_pages(&mock_server, 1).await;

    let client = client_for(&mock_server);
    let all = Account::find_all(&client, 0, 2, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(ids(&all.records), vec!["a1", "a2", "a3"]);
    assert_eq!(all.pagination_total_nb_records, 3);
    assert_eq!(all.pagination_max_nb_records, 3);
    assert_eq!(all.pages_fetched, 2);
}

#[tokio::test]
async fn test_account_each_in_batches_streams_every_page() {
    let mock_server = MockServer::start().await;
    mount_account_pages(&mock_server, 1).await;

    let client = client_for(&mock_server);
    let accounts: Vec<Account> = Account::each_in_batches(&client, 2, &RequestOptions::new())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids(&accounts), vec!["a1", "a2", "a3"]);
}

#[tokio::test]
async fn test_account_each_in_batches_stops_early() {
    let mock_server = MockServer::start().await;
    // The second page must never be requested
    mount_account_pages(&mock_server, 0).await;

    let client = client_for(&mock_server);
    let accounts: Vec<Account> = Account::each_in_batches(&client, 2, &RequestOptions::new())
        .take(2)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids(&accounts), vec!["a1", "a2"]);
}

#[tokio::test]
async fn test_account_pagination_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ACCOUNTS_PAGINATION))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Account::find_all(&client, 0, 100, &RequestOptions::new())
        .await
        .unwrap_err();

    match err {
        Error::Server {
            status, message, ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected Server, got {other:?}"),
    }
}

// ============================================================================
// Tenant, Tag Definition and Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_tenant_find_by_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/tenants"))
        .and(query_param("apiKey", "bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenantId": "t-1",
            "externalKey": "acme",
            "apiKey": "bob"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tenant = Tenant::find_by_api_key(&client, "bob", &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(tenant.tenant_id.as_deref(), Some("t-1"));
    assert_eq!(tenant.api_secret, None);
}

#[tokio::test]
async fn test_tag_definition_find_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/tagDefinitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "00000000-0000-0000-0000-000000000001", "isControlTag": true, "name": "AUTO_PAY_OFF"},
            {"id": "t-2", "isControlTag": false, "name": "vip", "description": "Important customer"}
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let options = RequestOptions::new();

    let vip = TagDefinition::find_by_name(&client, "vip", &options)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(vip.id.as_deref(), Some("t-2"));
    assert_eq!(vip.is_control_tag, Some(false));

    let missing = TagDefinition::find_by_name(&client, "nope", &options)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_catalog_plans() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/catalog/availableBasePlans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "product": "Standard",
            "plan": "standard-monthly",
            "priceList": "DEFAULT",
            "finalPhaseBillingPeriod": "MONTHLY",
            "finalPhaseRecurringPrice": [{"currency": "USD", "value": 100.0}]
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/catalog/availableAddons"))
        .and(query_param("baseProductName", "Standard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "product": "Extra",
            "plan": "extra-monthly"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let options = RequestOptions::new();

    let base = Catalog::available_base_plans(&client, &options)
        .await
        .unwrap();
    assert_eq!(base.len(), 1);
    assert_eq!(base[0].plan.as_deref(), Some("standard-monthly"));
    assert_eq!(base[0].final_phase_recurring_price[0].value, 100.0);

    let addons = Catalog::available_addons(&client, "Standard", &options)
        .await
        .unwrap();
    assert_eq!(addons[0].product.as_deref(), Some("Extra"));
    assert!(addons[0].final_phase_recurring_price.is_empty());
}

#[tokio::test]
async fn test_catalog_simple_catalog_is_typed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/catalog/simpleCatalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "Firearms",
            "effectiveDate": "2013-02-08T00:00:00.000Z",
            "currencies": ["USD", "EUR"],
            "products": [{
                "type": "BASE",
                "name": "Shotgun",
                "plans": [{
                    "name": "shotgun-monthly",
                    "billingPeriod": "MONTHLY",
                    "phases": [{"type": "EVERGREEN", "prices": [{"currency": "USD", "value": 249.95}]}]
                }],
                "included": [],
                "available": ["Telescopic-Scope"]
            }]
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let catalogs = Catalog::simple_catalog(&client, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(catalogs.len(), 1);
    let shotgun = catalogs[0].product("Shotgun").unwrap();
    assert_eq!(shotgun.product_type.as_deref(), Some("BASE"));
    assert_eq!(shotgun.available, vec!["Telescopic-Scope"]);
    assert_eq!(shotgun.plans[0].phases[0].prices[0].value, 249.95);
    assert!(catalogs[0].product("Pistol").is_none());
}

#[tokio::test]
async fn test_catalog_simple_catalog_single_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/catalog/simpleCatalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Firearms",
            "products": [{"type": "ADD_ON", "name": "Telescopic-Scope"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let catalogs = Catalog::simple_catalog(&client, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(catalogs.len(), 1);
    assert_eq!(catalogs[0].name.as_deref(), Some("Firearms"));
}

#[tokio::test]
async fn test_account_find_all_from_offset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ACCOUNTS_PAGINATION))
        .and(query_param("offset", "50"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(TOTAL_NB_RECORDS_HEADER, "51")
                .set_body_json(json!([account("a51")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let all = Account::find_all(&client, 50, 10, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(ids(&all.records), vec!["a51"]);
    assert_eq!(all.pagination_total_nb_records, 51);
}

// ============================================================================
// Account Tag and Custom Field Tests
// ============================================================================

const TEST_TAG_DEFINITION_ID: &str = "00000000-0000-0000-0000-000000000005";

async fn mount_tag_definitions(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/1.0/kb/tagDefinitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": TEST_TAG_DEFINITION_ID, "isControlTag": true, "name": "TEST"}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_account_tags() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/accounts/a1/tags"))
        .and(query_param("includedDeleted", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "tagId": "tag-1",
            "objectType": "ACCOUNT",
            "objectId": "a1",
            "tagDefinitionId": TEST_TAG_DEFINITION_ID,
            "tagDefinitionName": "TEST"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tags = Account::with_id("a1")
        .tags(&client, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].tag_definition_name.as_deref(), Some("TEST"));
}

#[tokio::test]
async fn test_account_add_tag_resolves_definition() {
    let mock_server = MockServer::start().await;
    mount_tag_definitions(&mock_server).await;
    let location = format!("{}/1.0/kb/accounts/a1/tags", mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/1.0/kb/accounts/a1/tags"))
        .and(query_param("tagDef", TEST_TAG_DEFINITION_ID))
        .and(header(CREATED_BY_HEADER, "admin"))
        .and(header(REASON_HEADER, "testing"))
        .respond_with(ResponseTemplate::new(201).insert_header("Location", location.as_str()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/accounts/a1/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "tagId": "tag-1",
            "tagDefinitionId": TEST_TAG_DEFINITION_ID,
            "tagDefinitionName": "TEST"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let options = RequestOptions::audited("admin").reason("testing");
    let tags = Account::with_id("a1")
        .add_tag(&client, "TEST", &options)
        .await
        .unwrap();

    assert_eq!(tags[0].tag_id.as_deref(), Some("tag-1"));
}

#[tokio::test]
async fn test_account_remove_tag() {
    let mock_server = MockServer::start().await;
    mount_tag_definitions(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/1.0/kb/accounts/a1/tags"))
        .and(query_param("tagDef", TEST_TAG_DEFINITION_ID))
        .and(header(CREATED_BY_HEADER, "admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    Account::with_id("a1")
        .remove_tag(&client, "TEST", &RequestOptions::audited("admin"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_account_add_unknown_tag_sends_nothing() {
    let mock_server = MockServer::start().await;
    mount_tag_definitions(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/1.0/kb/accounts/a1/tags"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Account::with_id("a1")
        .add_tag(&client, "NOPE", &RequestOptions::audited("admin"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn test_account_without_id_is_rejected() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let err = Account::default()
        .tags(&client, &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingId { resource: "Account" }));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_account_custom_fields() {
    let mock_server = MockServer::start().await;
    let location = format!("{}/1.0/kb/accounts/a1/customFields", mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/1.0/kb/accounts/a1/customFields"))
        .and(header(CREATED_BY_HEADER, "admin"))
        .and(body_json(json!([{"name": "color", "value": "blue"}])))
        .respond_with(ResponseTemplate::new(201).insert_header("Location", location.as_str()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/accounts/a1/customFields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "customFieldId": "cf-1",
            "objectId": "a1",
            "objectType": "ACCOUNT",
            "name": "color",
            "value": "blue"
        }])))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/1.0/kb/accounts/a1/customFields"))
        .and(query_param("customField", "cf-1"))
        .and(header(CREATED_BY_HEADER, "admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let account = Account::with_id("a1");
    let options = RequestOptions::audited("admin");

    let added = account
        .add_custom_field(&client, &CustomField::new("color", "blue"), &options)
        .await
        .unwrap();
    assert_eq!(added[0].custom_field_id.as_deref(), Some("cf-1"));

    let fields = account
        .custom_fields(&client, &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(fields[0].value.as_deref(), Some("blue"));

    account
        .remove_custom_field(&client, "cf-1", &options)
        .await
        .unwrap();
}
