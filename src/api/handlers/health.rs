/*
 * Responsibility
 * - GET / (liveness, no middleware besides the HTTP layers)
 */
pub async fn liveness() -> &'static str {
    "Yoga booking server is running"
}
