/*
[INPUT]:  STREAM_API_KEY / STREAM_API_SECRET environment variables
[OUTPUT]: Feed reads and activity writes against the live API
[POS]:    Examples - feed endpoints end to end
[UPDATE]: When feed endpoints change
*/

use stream_feeds_client::*;

/// Example: read and write a user feed
///
/// Requires STREAM_API_KEY and STREAM_API_SECRET to be set.
#[tokio::main]
async fn main() {
    println!("=== Stream Feeds Example ===\n");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
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
    println!("✓ Client created\n");

    let feed = match FeedId::new("user", "1") {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Invalid feed identity: {}", e);
            return;
        }
    };

    // Publish an activity
    println!("Adding activity to {}...", feed.target());
    let activity = Activity::new("user:1", "post", "note:1");
    match client.add_activity(&feed, &activity).await {
        Ok(stored) => println!("✓ Stored activity: {:?}", stored.id),
        Err(e) => println!("✗ Error: {}", e),
    }

    // Read the feed back
    println!("\nReading {}...", feed.target());
    match client.get_activities(&feed, [("limit", "10")]).await {
        Ok(page) => println!("✓ Got {} activities", page.results.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Feed example complete");
}
