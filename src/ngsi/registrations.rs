//! Registration listing command handlers

use std::io::Write;

use crate::cli::RegistrationsArgs;
use crate::error::Result;
use crate::ngsi::client::NgsiClient;
use crate::ngsi::entities::prepare_accept;
use crate::ngsi::listing::run_listing;
use crate::ngsi::models::{Collection, RequestSpec};
use crate::ngsi::pagination::PageRequest;

/// List context source registrations to `out`
pub async fn list_registrations<W: Write>(
    client: &mut NgsiClient,
    args: &RegistrationsArgs,
    out: W,
    batch: bool,
) -> Result<()> {
    prepare_accept(client, &args.render)?;
    let spec = RequestSpec {
        collection: Collection::Registrations,
        ..Default::default()
    };
    let request = PageRequest::get(client.dialect().registrations_path(), spec, "registrations");
    run_listing(client, request, args.render.count, args.render.mode(), out, batch).await
}

/// Run the 'list registrations' command
pub async fn run_registrations_command(
    client: &mut NgsiClient,
    args: &RegistrationsArgs,
    batch: bool,
) -> Result<()> {
    list_registrations(client, args, std::io::stdout(), batch).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RenderArgs;
    use crate::ngsi::dialect::DialectKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_v2_registrations_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/registrations"))
            .and(query_param("options", "count"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Fiware-Total-Count", "2")
                    .set_body_string(r#"[{"id":"5f5dcb551e715bc7f1ad79e3"},{"id":"5f5dcb551e715bc7f1ad79e4"}]"#),
            )
            .mount(&server)
            .await;
        let mut client = NgsiClient::test_client(&server.uri(), DialectKind::V2);
        let args = RegistrationsArgs {
            render: RenderArgs::default(),
        };

        let mut out = Vec::new();
        list_registrations(&mut client, &args, &mut out, true)
            .await
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "5f5dcb551e715bc7f1ad79e3\n5f5dcb551e715bc7f1ad79e4\n"
        );
    }

    #[tokio::test]
    async fn test_ld_registrations_verbose() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ngsi-ld/v1/csourceRegistrations"))
            .and(query_param("count", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("NGSILD-Results-Count", "1")
                    .set_body_string(r#"[{"id":"urn:ngsi-ld:ContextSourceRegistration:1","type":"ContextSourceRegistration"}]"#),
            )
            .mount(&server)
            .await;
        let mut client = NgsiClient::test_client(&server.uri(), DialectKind::Ld);
        let args = RegistrationsArgs {
            render: RenderArgs {
                verbose: true,
                ..Default::default()
            },
        };

        let mut out = Vec::new();
        list_registrations(&mut client, &args, &mut out, true)
            .await
            .unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["id"], "urn:ngsi-ld:ContextSourceRegistration:1");
    }
}
