//! Tests for the model wire format

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_account_serializes_camel_case_without_nulls() {
    let account = Account {
        name: Some("KillBillClient".to_string()),
        external_key: Some("ext-1".to_string()),
        currency: Some("USD".to_string()),
        time_zone: Some("UTC".to_string()),
        is_notified_for_invoices: Some(false),
        ..Default::default()
    };

    let value = serde_json::to_value(&account).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "KillBillClient",
            "externalKey": "ext-1",
            "currency": "USD",
            "timeZone": "UTC",
            "isNotifiedForInvoices": false
        })
    );
}

#[test]
fn test_account_deserializes_server_payload() {
    let account: Account = serde_json::from_value(json!({
        "accountId": "a1b2",
        "name": "KillBillClient",
        "externalKey": "ext-1",
        "email": "kill@bill.com",
        "billCycleDayLocal": 0,
        "currency": "USD",
        "paymentMethodId": null,
        "referenceTime": "2013-08-01T06:00:00.000Z",
        "accountBalance": -10.1,
        "accountCBA": 10.1,
        "auditLogs": [{
            "changeType": "INSERT",
            "changeDate": "2013-08-01T06:00:00.000Z",
            "changedBy": "integration test"
        }],
        "someFutureField": "ignored"
    }))
    .unwrap();

    assert_eq!(account.account_id.as_deref(), Some("a1b2"));
    assert!(account.payment_method_id.is_none());
    assert_eq!(account.account_balance, Some(-10.1));
    assert_eq!(account.account_cba, Some(10.1));
    assert!(account.reference_time.is_some());
    assert_eq!(account.audit_logs.len(), 1);
    assert_eq!(
        account.audit_logs[0].changed_by.as_deref(),
        Some("integration test")
    );
}

#[test]
fn test_tenant_wire_format() {
    let tenant = Tenant::new("bob", "lazar");
    assert_eq!(
        serde_json::to_value(&tenant).unwrap(),
        json!({"apiKey": "bob", "apiSecret": "lazar"})
    );
}

#[test]
fn test_tag_definition_wire_format() {
    let definition: TagDefinition = serde_json::from_value(json!({
        "id": "00000000-0000-0000-0000-000000000005",
        "isControlTag": true,
        "name": "TEST",
        "description": "Suspends payments until removed.",
        "applicableObjectTypes": ["ACCOUNT"],
        "auditLogs": []
    }))
    .unwrap();

    assert_eq!(definition.is_control_tag, Some(true));
    assert_eq!(definition.applicable_object_types, vec!["ACCOUNT"]);

    let new_definition = TagDefinition::new("vip", "Tag for unit test");
    assert_eq!(
        serde_json::to_value(&new_definition).unwrap(),
        json!({"name": "vip", "description": "Tag for unit test"})
    );
}

#[test]
fn test_plan_detail_wire_format() {
    let plans: Vec<PlanDetail> = serde_json::from_value(json!([{
        "product": "Sports",
        "plan": "sports-monthly",
        "priceList": "DEFAULT",
        "finalPhaseBillingPeriod": "MONTHLY",
        "finalPhaseRecurringPrice": [{"currency": "USD", "value": 500.0}]
    }]))
    .unwrap();

    assert_eq!(plans[0].plan.as_deref(), Some("sports-monthly"));
    assert_eq!(
        plans[0].final_phase_recurring_price,
        vec![Price {
            currency: "USD".to_string(),
            value: 500.0
        }]
    );
}

#[test]
fn test_tag_wire_format() {
    let tag: Tag = serde_json::from_value(json!({
        "tagId": "t-1",
        "objectType": "ACCOUNT",
        "objectId": "a1b2",
        "tagDefinitionId": "00000000-0000-0000-0000-000000000005",
        "tagDefinitionName": "TEST",
        "auditLogs": []
    }))
    .unwrap();

    assert_eq!(tag.tag_definition_name.as_deref(), Some("TEST"));
    assert_eq!(tag.object_type.as_deref(), Some("ACCOUNT"));
}

#[test]
fn test_custom_field_wire_format() {
    let field = CustomField::new("color", "blue");
    assert_eq!(
        serde_json::to_value(&field).unwrap(),
        json!({"name": "color", "value": "blue"})
    );

    let stored: CustomField = serde_json::from_value(json!({
        "customFieldId": "cf-1",
        "objectId": "a1b2",
        "objectType": "ACCOUNT",
        "name": "color",
        "value": "blue"
    }))
    .unwrap();
    assert_eq!(stored.custom_field_id.as_deref(), Some("cf-1"));
}

#[test]
fn test_catalog_wire_format() {
    let catalog: Catalog = serde_json::from_value(json!({
        "name": "Firearms",
        "effectiveDate": "2013-02-08T00:00:00.000Z",
        "currencies": ["USD"],
        "units": [],
        "products": [{
            "type": "ADD_ON",
            "name": "Telescopic-Scope",
            "prettyName": "Telescopic Scope",
            "plans": [{
                "name": "telescopic-scope-monthly",
                "billingPeriod": "MONTHLY",
                "phases": [
                    {"type": "DISCOUNT", "prices": [{"currency": "USD", "value": 399.95}]},
                    {"type": "EVERGREEN", "prices": [{"currency": "USD", "value": 999.95}]}
                ]
            }]
        }]
    }))
    .unwrap();

    let scope = catalog.product("Telescopic-Scope").unwrap();
    assert_eq!(scope.product_type.as_deref(), Some("ADD_ON"));
    assert_eq!(scope.plans[0].phases.len(), 2);
    assert_eq!(
        scope.plans[0].phases[1],
        Phase {
            phase_type: Some("EVERGREEN".to_string()),
            prices: vec![Price {
                currency: "USD".to_string(),
                value: 999.95
            }],
            fixed_prices: vec![],
        }
    );
    assert!(scope.included.is_empty());
}
