use std::sync::Arc;

use synctube_bot::{
    synctube::{FixedClock, ReqwestTransport, SyncTubeEndpoints, TungsteniteConnector},
    CommandDispatcher, RoomProvisioner,
};

use super::mock_synctube::{MockBehavior, MockSyncTube};

pub const ROOM_NAME: &str = "TestRoom";
pub const FIXED_TIMESTAMP: i64 = 1_700_000_000;

/// Test setup wiring real transports to a local mock service
pub struct TestSetup {
    pub service: MockSyncTube,
    pub base_url: String,
    pub provisioner: Arc<RoomProvisioner>,
}

impl TestSetup {
    pub async fn new() -> Self {
        Self::with_behavior(MockBehavior::default()).await
    }

    pub async fn with_behavior(behavior: MockBehavior) -> Self {
        let (service, base_url) = MockSyncTube::start(behavior).await;
        let provisioner = Arc::new(provisioner_for(&base_url));

        Self {
            service,
            base_url,
            provisioner,
        }
    }

    pub fn dispatcher(&self) -> CommandDispatcher {
        CommandDispatcher::new(Arc::clone(&self.provisioner))
    }

    pub fn room_url(&self, room_id: &str) -> String {
        format!("{}/room/{}", self.base_url, room_id)
    }
}

/// Provisioner with production transports and a frozen clock
pub fn provisioner_for(base_url: &str) -> RoomProvisioner {
    RoomProvisioner::new(
        SyncTubeEndpoints::new(base_url).unwrap(),
        ROOM_NAME.to_string(),
        Arc::new(ReqwestTransport::default()),
        Arc::new(TungsteniteConnector),
        Arc::new(FixedClock::at_unix(FIXED_TIMESTAMP)),
    )
}

/// Base URL nothing is listening on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
