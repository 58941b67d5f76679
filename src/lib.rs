// notiscore: notification severity scoring against a chat-completion endpoint.
//
// This is the library root. `scoring` holds the request/response contract,
// the HTTP transport and the serial worker queue. The rest is the glue the
// `notiscore` binary needs around it.

pub mod config;
pub mod output;
pub mod preferences;
pub mod scoring;
pub mod status;
