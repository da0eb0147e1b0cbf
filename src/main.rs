#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    gig_booking_backend::run().await
}
