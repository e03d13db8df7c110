use flora::web_service::{self, AppState};
use flora::{handle_message, Result, Sessions, Storage};
use transport::{Command, Topic};

use std::net::SocketAddr;
use std::process;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::StreamExt;
use log::{error, info};
use paho_mqtt as mqtt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tokio::{task, time};

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let mqtt_address = std::env::var("MQTT_ADDRESS").expect("set ENV variable MQTT_ADDRESS");
    let mqtt_client = connect_mqtt(mqtt_address).await?;
    info!("connected mqtt");

    let http_port = std::env::var("HTTP_PORT").unwrap_or("3000".to_string()).parse()?;
    let static_dir = std::env::var("STATIC_DIR").unwrap_or("public".to_string());

    let storage = Arc::from(Mutex::from(Storage::new()));
    let sessions = Arc::from(Sessions::new());

    let (web_handle, state_handle) = tokio::try_join!(
        task::spawn(listen_web(
            mqtt_client.clone(),
            storage.clone(),
            sessions.clone(),
            http_port,
            static_dir
        )),
        task::spawn(subscribe_device(mqtt_client, storage, sessions))
    )?;

    web_handle?;
    state_handle?;

    Ok(())
}

async fn connect_mqtt(address: String) -> Result<mqtt::AsyncClient> {
    let create_opts = mqtt::CreateOptionsBuilder::new_v3()
        .server_uri(address)
        .client_id("flora")
        .finalize();

    let client = mqtt::AsyncClient::new(create_opts).unwrap_or_else(|err| {
        error!("Error creating the client: {}", err);
        process::exit(1);
    });

    let conn_opts = mqtt::ConnectOptionsBuilder::new_v3()
        .keep_alive_interval(Duration::from_secs(30))
        .clean_session(false)
        .finalize();

    client.connect(conn_opts).await?;

    Ok(client)
}

async fn subscribe_device(
    mut mqtt: mqtt::AsyncClient,
    storage: Arc<Mutex<Storage>>,
    sessions: Arc<Sessions>,
) -> Result<()> {
    let mut stream = mqtt.get_stream(None);

    let topics = [Topic::Moisture.to_string(), Topic::BoardStatus.to_string()];
    let qos = [mqtt::QOS_1; 2];

    mqtt.subscribe_many(&topics, &qos);
    info!("Subscribed to topics: {:?}", topics);

    while let Some(msg_opt) = stream.next().await {
        if let Some(msg) = msg_opt {
            match Topic::from_str(msg.topic()) {
                Ok(topic) => {
                    if let Err(err) =
                        handle_message(topic, msg.payload(), &storage, &sessions).await
                    {
                        error!("Error handling message: {}", err);
                    }
                }
                Err(err) => error!("unable to parse topic {} {}", msg.topic(), err),
            }
        } else {
            error!("Lost MQTT connection. Attempting reconnect.");
            while let Err(err) = mqtt.reconnect().await {
                error!("Error MQTT reconnecting: {}", err);
                time::sleep(Duration::from_secs(1)).await;
            }

            mqtt.subscribe_many(&topics, &qos);
            info!("Resubscribed to topics: {:?}", topics);
        }
    }

    Ok(())
}

async fn listen_web(
    mqtt: mqtt::AsyncClient,
    storage: Arc<Mutex<Storage>>,
    sessions: Arc<Sessions>,
    port: u16,
    static_dir: String,
) -> Result<()> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    let state = AppState {
        storage,
        sessions,
        commands: tx,
    };
    let app = web_service::router(state, &static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let (server_handle, relay_handle) = tokio::try_join!(
        task::spawn(async move {
            info!("Listening http://{}", addr);
            axum::serve(listener, app).await
        }),
        task::spawn(relay_commands(rx, mqtt))
    )?;

    server_handle?;
    relay_handle?;

    Ok(())
}

// Relaying is best effort: a command that fails to publish is logged and
// dropped, the viewer gets no acknowledgment either way.
async fn relay_commands(
    mut queue: UnboundedReceiver<Command>,
    mqtt: mqtt::AsyncClient,
) -> Result<()> {
    while let Some(command) = queue.recv().await {
        info!("relaying command: {:?}", command);

        let payload = match serde_json::to_vec(&command) {
            Ok(payload) => payload,
            Err(err) => {
                error!("unable to serialize command: {}", err);
                continue;
            }
        };

        let message = mqtt::MessageBuilder::new()
            .topic(Topic::Command.to_string())
            .payload(payload)
            .finalize();

        if let Err(err) = mqtt.publish(message).await {
            error!("Error publishing command: {}", err);
        }
    }

    Ok(())
}
