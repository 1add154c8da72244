/// Domain model of the Hover API.
///
/// Field names follow the JSON the API sends. Hover omits or nulls fields
/// freely, so everything except an entity's identifier falls back to its
/// empty value when missing or `null`.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use crate::codec::{Date, DnsRecordId, DomainId, RecordType, Ttl, YearMonth};

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Billing setup of the account owning a domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Billing {
    #[serde(deserialize_with = "null_as_default")]
    pub pay_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub card_number: String,
    pub card_expires: Option<YearMonth>,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub postal_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
}

/// The Hover user a domain belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_secondary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub billing: Billing,
}

/// How to reach a person or organisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub org_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fax: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(rename = "zip", deserialize_with = "null_as_default")]
    pub zip_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address3: String,
}

/// Registration contacts of a domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contacts {
    #[serde(deserialize_with = "null_as_default")]
    pub admin: Contact,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: Contact,
    #[serde(deserialize_with = "null_as_default")]
    pub tech: Contact,
}

/// A registered domain and its account information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: DomainId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_name: String,
    #[serde(default)]
    pub renewal_date: Option<Date>,
    #[serde(default)]
    pub display_date: Option<Date>,
    #[serde(default)]
    pub registered_date: Option<Date>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub glue: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hover_user: User,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nameservers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub renewable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_renew: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub whois_privacy: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_emails: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contacts: Contacts,
}

/// A DNS record of a domain.
///
/// `id` is only absent on records that have not been created yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DnsRecordId>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub record_type: RecordType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ttl: Ttl,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_default: bool,
    /// Informational only; the client cannot undo a deletion.
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_revert: bool,
}

/// The DNS view of a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsDomain {
    pub id: DomainId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<DnsRecord>,
}

impl DnsDomain {
    /// Records of the given type, in server order.
    pub fn records_of_type<'a>(
        &'a self,
        record_type: &'a RecordType,
    ) -> impl Iterator<Item = &'a DnsRecord> + 'a {
        self.entries
            .iter()
            .filter(move |record| &record.record_type == record_type)
    }
}

/// Data needed to create a DNS record. Never carries an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDnsRecord {
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: Ttl,
}

impl NewDnsRecord {
    pub fn new(
        record_type: RecordType,
        name: impl Into<String>,
        content: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            content: content.into(),
            ttl: ttl.into(),
        }
    }

    /// Query parameters of the create request.
    pub(crate) fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("type", self.record_type.as_str().to_string()),
            ("name", self.name.clone()),
            ("content", self.content.clone()),
            ("ttl", self.ttl.as_secs().to_string()),
        ]
    }
}

impl From<&DnsRecord> for NewDnsRecord {
    fn from(record: &DnsRecord) -> Self {
        Self {
            record_type: record.record_type.clone(),
            name: record.name.clone(),
            content: record.content.clone(),
            ttl: record.ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN_JSON: &str = r#"{
        "id": "dom1234",
        "status": "active",
        "domain_name": "example.com",
        "renewal_date": "2025-06-01",
        "display_date": "2025-06-01",
        "registered_date": "2015-06-01",
        "glue": {},
        "hover_user": {
            "email": "owner@example.com",
            "email_secondary": "",
            "billing": {
                "pay_mode": "card",
                "card_number": "xxxx-1111",
                "card_expires": "2027/04",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "country": "CA"
            }
        },
        "nameservers": ["ns1.hover.com", "ns2.hover.com"],
        "renewable": true,
        "auto_renew": true,
        "locked": true,
        "whois_privacy": false,
        "num_emails": 2,
        "contacts": {
            "admin": {"first_name": "Ada", "zip": "H0H 0H0"},
            "owner": {"first_name": "Ada"},
            "tech": null
        }
    }"#;

    #[test]
    fn test_domain_decodes_all_field_formats() {
        let domain: Domain = serde_json::from_str(DOMAIN_JSON).unwrap();
        assert_eq!(domain.id.as_str(), "dom1234");
        assert_eq!(domain.domain_name, "example.com");
        assert_eq!(domain.renewal_date, Date::from_ymd(2025, 6, 1));
        assert_eq!(domain.registered_date, Date::from_ymd(2015, 6, 1));
        assert_eq!(domain.nameservers.len(), 2);
        assert!(domain.renewable && domain.auto_renew && domain.locked);
        assert!(!domain.whois_privacy);
        assert_eq!(domain.num_emails, 2);
        assert_eq!(
            domain.hover_user.billing.card_expires,
            YearMonth::new(2027, 4)
        );
        assert_eq!(domain.contacts.admin.zip_code, "H0H 0H0");
        assert_eq!(domain.contacts.tech, Contact::default());
    }

    #[test]
    fn test_domain_requires_string_id() {
        let err = serde_json::from_str::<Domain>(r#"{"id": 42}"#).unwrap_err();
        assert!(err.to_string().contains("DomainID"));
        assert!(serde_json::from_str::<Domain>(r#"{"domain_name": "x.com"}"#).is_err());
    }

    #[test]
    fn test_domain_with_null_fields_uses_empty_values() {
        let json = r#"{
            "id": "d1",
            "status": null,
            "domain_name": "example.com",
            "renewal_date": null,
            "auto_renew": null,
            "num_emails": null,
            "hover_user": {
                "email": "a@b.example",
                "email_secondary": null,
                "billing": {"pay_mode": null, "card_expires": null, "address2": null}
            },
            "contacts": {"admin": {"first_name": "Ada", "fax": null, "zip": null, "address2": null}}
        }"#;
        let domain: Domain = serde_json::from_str(json).unwrap();
        assert_eq!(domain.status, "");
        assert_eq!(domain.renewal_date, None);
        assert!(!domain.auto_renew);
        assert_eq!(domain.num_emails, 0);
        assert_eq!(domain.hover_user.email, "a@b.example");
        assert_eq!(domain.hover_user.email_secondary, "");
        assert_eq!(domain.hover_user.billing, Billing::default());
        assert_eq!(domain.contacts.admin.first_name, "Ada");
        assert_eq!(domain.contacts.admin.fax, "");
        assert_eq!(domain.contacts.admin.zip_code, "");
    }

    #[test]
    fn test_dns_record_with_null_fields_uses_empty_values() {
        let json = r#"{
            "id": "dom1",
            "domain_name": null,
            "active": null,
            "entries": [
                {"id": "dns1", "type": null, "name": null, "content": "127.0.0.1",
                 "ttl": null, "is_default": null, "can_revert": null}
            ]
        }"#;
        let dns: DnsDomain = serde_json::from_str(json).unwrap();
        assert_eq!(dns.domain_name, "");
        assert!(!dns.active);
        let record = &dns.entries[0];
        assert_eq!(record.id, Some(DnsRecordId::new("dns1")));
        assert_eq!(record.record_type, RecordType::default());
        assert_eq!(record.name, "");
        assert_eq!(record.content, "127.0.0.1");
        assert_eq!(record.ttl, Ttl::default());
        assert!(!record.is_default && !record.can_revert);
    }

    #[test]
    fn test_domain_with_bad_date_fails() {
        let err = serde_json::from_str::<Domain>(r#"{"id": "d1", "renewal_date": "06/01/2025"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Date"));
    }

    #[test]
    fn test_dns_domain_decodes_records_in_order() {
        let json = r#"{
            "id": "dom1",
            "domain_name": "example.com",
            "active": true,
            "entries": [
                {"id": "dns1", "type": "A", "name": "@", "content": "127.0.0.1",
                 "ttl": 900, "is_default": true, "can_revert": false},
                {"id": "dns2", "type": "NAPTR", "name": "sip", "content": "x",
                 "ttl": 300, "is_default": false, "can_revert": true},
                {"id": "dns3", "type": "A", "name": "www", "content": "127.0.0.2",
                 "ttl": 900}
            ]
        }"#;
        let dns: DnsDomain = serde_json::from_str(json).unwrap();
        assert!(dns.active);
        let ids: Vec<_> = dns
            .entries
            .iter()
            .filter_map(|r| r.id.as_ref().map(DnsRecordId::as_str))
            .collect();
        assert_eq!(ids, ["dns1", "dns2", "dns3"]);
        assert_eq!(dns.entries[1].record_type.as_str(), "NAPTR");
        assert!(dns.entries[1].can_revert);
        assert_eq!(dns.entries[0].ttl, Ttl::from_secs(900));
        assert_eq!(dns.records_of_type(&RecordType::A).count(), 2);
    }

    #[test]
    fn test_dns_record_without_id_serializes_without_id() {
        let record = DnsRecord {
            record_type: RecordType::TXT,
            name: "@".to_string(),
            content: "hello".to_string(),
            ttl: Ttl::from_secs(60),
            ..DnsRecord::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["type"], "TXT");
        assert_eq!(value["ttl"], 60);
    }

    #[test]
    fn test_new_record_query_pairs() {
        let record = NewDnsRecord::new(
            RecordType::MX,
            "mail",
            "10 mx.example.com",
            Duration::from_secs(3600),
        );
        assert_eq!(
            record.query_pairs(),
            [
                ("type", "MX".to_string()),
                ("name", "mail".to_string()),
                ("content", "10 mx.example.com".to_string()),
                ("ttl", "3600".to_string()),
            ]
        );
    }

    #[test]
    fn test_new_record_from_existing_record_drops_id() {
        let existing = DnsRecord {
            id: Some(DnsRecordId::new("dns9")),
            record_type: RecordType::CNAME,
            name: "www".to_string(),
            content: "example.com".to_string(),
            ttl: Ttl::from_secs(900),
            is_default: true,
            can_revert: false,
        };
        let copy = NewDnsRecord::from(&existing);
        assert_eq!(copy.record_type, RecordType::CNAME);
        assert_eq!(copy.content, "example.com");
        assert_eq!(copy.ttl.as_secs(), 900);
    }
}
