//! Entity listing and batch query command handlers

use log::debug;
use std::fs;
use std::io::Write;

use crate::cli::{EntitiesArgs, QueryArgs, RenderArgs};
use crate::config::api;
use crate::error::{NgsiError, Result};
use crate::ngsi::client::NgsiClient;
use crate::ngsi::dialect::DialectKind;
use crate::ngsi::listing::run_listing;
use crate::ngsi::models::RequestSpec;
use crate::ngsi::pagination::PageRequest;
use crate::output::RenderMode;

/// Check dialect support for the output flags and set the Accept header
pub fn prepare_accept(client: &mut NgsiClient, render: &RenderArgs) -> Result<()> {
    if render.accept_geo_json && client.dialect_kind() != DialectKind::Ld {
        return Err(NgsiError::Config(
            "--accept-geo-json is only available on NGSI-LD".to_string(),
        ));
    }
    // NGSI-LD has no `values` representation, pages would be objects
    if render.values && client.dialect_kind() == DialectKind::Ld {
        return Err(NgsiError::Config(
            "--values is only available on NGSIv2".to_string(),
        ));
    }
    let accept = client.dialect().accept(render.accept_geo_json);
    client.set_accept(Some(accept));
    Ok(())
}

/// Build the entity listing request for these arguments
///
/// Plain id listings only ask the broker for the `id` attribute.
pub fn entities_request(client: &NgsiClient, args: &EntitiesArgs) -> PageRequest {
    let mut spec = args.filter.to_spec(&args.render);
    if args.render.mode() == RenderMode::IdsOnly && spec.attrs.is_none() {
        spec.attrs = Some("id".to_string());
    }
    PageRequest::get(client.dialect().entities_path(), spec, "entities")
}

/// List entities to `out`
pub async fn list_entities<W: Write>(
    client: &mut NgsiClient,
    args: &EntitiesArgs,
    out: W,
    batch: bool,
) -> Result<()> {
    prepare_accept(client, &args.render)?;
    let request = entities_request(client, args);
    run_listing(client, request, args.render.count, args.render.mode(), out, batch).await
}

/// Run the 'list entities' command
pub async fn run_entities_command(
    client: &mut NgsiClient,
    args: &EntitiesArgs,
    batch: bool,
) -> Result<()> {
    list_entities(client, args, std::io::stdout(), batch).await
}

/// Read the query payload: `@FILE` reads a file, anything else is literal JSON
pub fn read_payload(data: &str) -> Result<Vec<u8>> {
    let bytes = match data.strip_prefix('@') {
        Some(path) => fs::read(path).map_err(|e| {
            NgsiError::Config(format!("Failed to read query payload {}: {}", path, e))
        })?,
        None => data.as_bytes().to_vec(),
    };
    if bytes.trim_ascii().is_empty() {
        return Err(NgsiError::Config("query payload is empty".to_string()));
    }
    serde_json::from_slice::<serde::de::IgnoredAny>(&bytes)
        .map_err(|e| NgsiError::Config(format!("query payload is not valid JSON: {}", e)))?;
    Ok(bytes)
}

/// Run a batch query (POST /v2/op/query) to `out`
pub async fn query_entities<W: Write>(
    client: &mut NgsiClient,
    args: &QueryArgs,
    out: W,
    batch: bool,
) -> Result<()> {
    if client.dialect_kind() != DialectKind::V2 {
        return Err(NgsiError::Config(
            "query is only available on NGSIv2".to_string(),
        ));
    }
    prepare_accept(client, &args.render)?;

    let body = read_payload(&args.data)?;
    debug!("Batch query payload: {} bytes", body.len());

    let spec = RequestSpec {
        order_by: args.order_by.clone(),
        key_values: args.render.key_values,
        values: args.render.values,
        unique: args.render.unique,
        ..Default::default()
    };
    let path = format!("{}/{}", client.dialect().base_path(), api::OP_QUERY);
    let request = PageRequest::post(path, spec, body, "batch query");
    run_listing(client, request, args.render.count, args.render.mode(), out, batch).await
}

/// Run the 'query' command
pub async fn run_query_command(client: &mut NgsiClient, args: &QueryArgs, batch: bool) -> Result<()> {
    query_entities(client, args, std::io::stdout(), batch).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FilterArgs;
    use tempfile::TempDir;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args(filter: FilterArgs, render: RenderArgs) -> EntitiesArgs {
        EntitiesArgs { filter, render }
    }

    #[test]
    fn test_ids_only_requests_id_attribute() {
        let client = NgsiClient::test_client("http://localhost:1026", DialectKind::V2);
        let request = entities_request(&client, &args(FilterArgs::default(), RenderArgs::default()));
        assert_eq!(request.path, "/v2/entities");
        assert_eq!(request.spec.attrs.as_deref(), Some("id"));
    }

    #[test]
    fn test_explicit_attrs_are_kept() {
        let client = NgsiClient::test_client("http://localhost:1026", DialectKind::V2);
        let filter = FilterArgs {
            attrs: Some("temperature".to_string()),
            ..Default::default()
        };
        let request = entities_request(&client, &args(filter, RenderArgs::default()));
        assert_eq!(request.spec.attrs.as_deref(), Some("temperature"));
    }

    #[test]
    fn test_verbose_does_not_restrict_attrs() {
        let client = NgsiClient::test_client("http://localhost:1026", DialectKind::Ld);
        let render = RenderArgs {
            verbose: true,
            ..Default::default()
        };
        let request = entities_request(&client, &args(FilterArgs::default(), render));
        assert_eq!(request.path, "/ngsi-ld/v1/entities");
        assert!(request.spec.attrs.is_none());
    }

    #[test]
    fn test_geojson_rejected_on_v2() {
        let mut client = NgsiClient::test_client("http://localhost:1026", DialectKind::V2);
        let render = RenderArgs {
            accept_geo_json: true,
            ..Default::default()
        };
        let err = prepare_accept(&mut client, &render).unwrap_err();
        assert!(matches!(err, NgsiError::Config(_)));
    }

    #[test]
    fn test_values_rejected_on_ld() {
        let mut client = NgsiClient::test_client("http://localhost:9090", DialectKind::Ld);
        let render = RenderArgs {
            values: true,
            lines: true,
            ..Default::default()
        };
        match prepare_accept(&mut client, &render) {
            Err(NgsiError::Config(msg)) => assert!(msg.contains("--values")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_entities_ld_values_lines_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ngsi-ld/v1/entities"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;
        let mut client = NgsiClient::test_client(&server.uri(), DialectKind::Ld);
        let render = RenderArgs {
            values: true,
            lines: true,
            ..Default::default()
        };

        let mut out = Vec::new();
        let err = list_entities(&mut client, &args(FilterArgs::default(), render), &mut out, true)
            .await
            .unwrap_err();
        assert!(matches!(err, NgsiError::Config(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_read_payload_literal_and_file() {
        assert_eq!(read_payload(r#"{"entities":[]}"#).unwrap(), br#"{"entities":[]}"#);

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("query.json");
        fs::write(&file, r#"{"entities":[{"idPattern":".*"}]}"#).unwrap();
        let payload = read_payload(&format!("@{}", file.display())).unwrap();
        assert_eq!(payload, br#"{"entities":[{"idPattern":".*"}]}"#);
    }

    #[test]
    fn test_read_payload_rejects_invalid() {
        assert!(read_payload("").is_err());
        assert!(read_payload("{not json").is_err());
        assert!(read_payload("@/nonexistent/query.json").is_err());
    }

    #[tokio::test]
    async fn test_list_entities_lines_mode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/entities"))
            .and(query_param("type", "Room"))
            .and(query_param("options", "count"))
            .and(header("Accept", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Fiware-Total-Count", "2")
                    .set_body_string(
                        r#"[{"type":"Room","id":"Room1","temperature":{"value":23}},{"type":"Room","id":"Room2"}]"#,
                    ),
            )
            .expect(1)
            .mount(&server)
            .await;
        let mut client = NgsiClient::test_client(&server.uri(), DialectKind::V2);
        let filter = FilterArgs {
            entity_type: Some("Room".to_string()),
            ..Default::default()
        };
        let render = RenderArgs {
            lines: true,
            ..Default::default()
        };

        let mut out = Vec::new();
        list_entities(&mut client, &args(filter, render), &mut out, true)
            .await
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"id\":\"Room1\",\"temperature\":{\"value\":23},\"type\":\"Room\"}\n{\"id\":\"Room2\",\"type\":\"Room\"}\n"
        );
    }

    #[tokio::test]
    async fn test_list_entities_value_lines() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/entities"))
            .and(query_param("options", "values,count"))
            .and(query_param("attrs", "temperature"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Fiware-Total-Count", "2")
                    .set_body_string("[[23],[21.5]]"),
            )
            .mount(&server)
            .await;
        let mut client = NgsiClient::test_client(&server.uri(), DialectKind::V2);
        let filter = FilterArgs {
            attrs: Some("temperature".to_string()),
            ..Default::default()
        };
        let render = RenderArgs {
            values: true,
            lines: true,
            ..Default::default()
        };

        let mut out = Vec::new();
        list_entities(&mut client, &args(filter, render), &mut out, true)
            .await
            .unwrap();
        assert_eq!(out, b"[23]\n[21.5]\n");
    }

    #[tokio::test]
    async fn test_list_entities_ld_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ngsi-ld/v1/entities"))
            .and(query_param("count", "true"))
            .and(query_param("limit", "0"))
            .and(query_param("type", "Shelf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("NGSILD-Results-Count", "7")
                    .set_body_string("[]"),
            )
            .expect(1)
            .mount(&server)
            .await;
        let mut client = NgsiClient::test_client(&server.uri(), DialectKind::Ld);
        let filter = FilterArgs {
            entity_type: Some("Shelf".to_string()),
            ..Default::default()
        };
        let render = RenderArgs {
            count: true,
            ..Default::default()
        };

        let mut out = Vec::new();
        list_entities(&mut client, &args(filter, render), &mut out, true)
            .await
            .unwrap();
        assert_eq!(out, b"7\n");
    }

    #[tokio::test]
    async fn test_list_entities_geojson_accept_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ngsi-ld/v1/entities"))
            .and(header("Accept", "application/geo+json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("NGSILD-Results-Count", "1")
                    .set_body_string(r#"{"type":"FeatureCollection","features":[{"id":"urn:a"}]}"#),
            )
            .expect(1)
            .mount(&server)
            .await;
        let mut client = NgsiClient::test_client(&server.uri(), DialectKind::Ld);
        let render = RenderArgs {
            accept_geo_json: true,
            ..Default::default()
        };

        let mut out = Vec::new();
        list_entities(&mut client, &args(FilterArgs::default(), render), &mut out, true)
            .await
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"{"type":"FeatureCollection","features":[{"id":"urn:a"}]}"#
        );
    }

    #[tokio::test]
    async fn test_batch_query_posts_payload() {
        let server = MockServer::start().await;
        let payload = r#"{"entities":[{"idPattern":".*","type":"Room"}]}"#;
        Mock::given(method("POST"))
            .and(path("/v2/op/query"))
            .and(query_param("options", "keyValues,count"))
            .and(query_param("orderBy", "id"))
            .and(body_string(payload))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Fiware-Total-Count", "1")
                    .set_body_string(r#"[{"id":"Room1","type":"Room"}]"#),
            )
            .expect(1)
            .mount(&server)
            .await;
        let mut client = NgsiClient::test_client(&server.uri(), DialectKind::V2);
        let query = QueryArgs {
            data: payload.to_string(),
            order_by: Some("id".to_string()),
            render: RenderArgs {
                key_values: true,
                verbose: true,
                ..Default::default()
            },
        };

        let mut out = Vec::new();
        query_entities(&mut client, &query, &mut out, true).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"[{"id":"Room1","type":"Room"}]"#);
    }

    #[tokio::test]
    async fn test_batch_query_rejected_on_ld() {
        let mut client = NgsiClient::test_client("http://localhost:1026", DialectKind::Ld);
        let query = QueryArgs {
            data: "{}".to_string(),
            order_by: None,
            render: RenderArgs::default(),
        };
        let err = query_entities(&mut client, &query, Vec::new(), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("only available on NGSIv2"));
    }
}
