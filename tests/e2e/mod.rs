// End-to-end tests for the Speech Studio HTTP surface
//
// Each test starts the real router on an ephemeral port and points the OpenAI
// repository at its own wiremock server, so tests run in parallel without
// shared state. Transient audio files go to a per-test temporary directory
// which the tests inspect to check cleanup.

mod test_openai_repository;
