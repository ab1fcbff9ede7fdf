//! Operator-triggered remote jobs.
//!
//! - [`upload`]: submits the file set, classifies the reply and holds the
//!   resulting analytics and recommendations.
//! - [`campaign`]: asks the backend to email the rewards of a trained model.
//!
//! Both follow the same pattern: a pure reducer owns the state transitions, a
//! small wrapper produces the request to send on the edge into the in-flight
//! state, and an async `dispatch` sends it through a
//! [`Transport`](crate::transport::Transport) and classifies the reply. Each
//! attempt is sent exactly once; retrying is up to the operator.

pub mod campaign;
pub mod upload;
