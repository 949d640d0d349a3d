/*
[INPUT]:  Canned API credentials
[OUTPUT]: Prepared and signed requests printed for inspection
[POS]:    Examples - the raw request pipeline without network traffic
[UPDATE]: When pipeline stages change
*/

use reqwest::Method;
use stream_feeds_client::*;

/// Example: walk a request through prepare and sign, both auth schemes
#[tokio::main]
async fn main() {
    println!("=== Request Signing Example ===\n");

    let config = match Config::new("demo-key", "demo-secret") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to build configuration: {}", e);
            return;
        }
    };
    let client = match StreamClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    // Key/secret scheme: HMAC signature over the request date
    let req = ApiRequest::new(Method::GET, "/status/").with_params([("limit", "5")]);
    let req = client.prepare_request(req).expect("prepare");
    let req = client.sign_request(req).expect("sign");

    println!("Key/secret signed request:");
    println!("  url: {}", req.url);
    for (name, value) in &req.headers {
        println!("  {}: {}", name, value);
    }

    // Token scheme: compact scope token
    let req = ApiRequest::new(Method::GET, "/feed/user/1/").with_token("user1", "feed", "read");
    let req = client.prepare_request(req).expect("prepare");
    let req = client.sign_request(req).expect("sign");

    println!("\nToken signed request:");
    println!("  url: {}", req.url);
    for (name, value) in &req.headers {
        println!("  {}: {}", name, value);
    }

    // The minted user token is verifiable with the shared secret
    let token = client.create_user_token("jane").expect("user token");
    let claims = auth::token::decompact(&token, "demo-secret").expect("verify");
    println!("\nUser token claims: {:?}", claims);

    println!("\n✓ Signing example complete");
}
