use crate::{models::Notice, Config, Error, HttpClient};
use bytes::Bytes;
use http::{Request, Response};
use serde::Serialize;

/// Wire document: the notice fields nested under a `notice` root key.
#[derive(Serialize)]
struct Payload<'a> {
    notice: &'a Notice,
}

/// Serialize the notice and post it to the collector. One request, no
/// retries.
pub(crate) fn send<C: HttpClient>(
    client: &C,
    config: &Config,
    notice: &Notice,
) -> Result<(), Error> {
    let endpoint = config.endpoint()?;
    let body = serde_yaml::to_string(&Payload { notice }).map_err(Error::SerializeNotice)?;
    let request = Request::post(endpoint)
        .header(http::header::CONTENT_TYPE, "application/x-yaml")
        .header(http::header::ACCEPT, "text/xml, application/xml")
        .body(body.into_bytes())
        .expect("request should be valid");
    let response = client.send(request).map_err(Error::Connection)?;
    handle_response(response)
}

fn handle_response(response: Response<Bytes>) -> Result<(), Error> {
    let status = response.status();
    if status.is_success() {
        log::info!("notice accepted with status {status}");
        Ok(())
    } else {
        Err(Error::Upload {
            status: status.as_u16(),
            body: String::from_utf8_lossy(response.body()).into_owned(),
        })
    }
}
