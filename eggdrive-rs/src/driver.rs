//! High-level drive commands.
//!
//! Everything here is a thin call-site: build one statement, execute it,
//! coerce the return value.  No new protocol logic lives in this module —
//! the interesting rules are in [`statement`](crate::statement) and
//! [`response`](crate::response).

use crate::fault::DriveError;
use crate::response::{PropertyList, RawValue};
use crate::session::Drive;
use crate::statement::StatementBuilder;
use crate::transport::Transport;
use crate::value::{quote, Point, Size, Value};

// ── Option types ──────────────────────────────────────────────────────────────

/// Protocol used to reach the system under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    Vnc,
    Rdp,
}

impl ConnectionType {
    fn as_str(self) -> &'static str {
        match self {
            ConnectionType::Vnc => "VNC",
            ConnectionType::Rdp => "RDP",
        }
    }
}

/// Options for [`Drive::connect`].  Only `server_id` is required.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Hostname, IP address, or connection-list display name.
    pub server_id: String,
    /// Server port on the SUT; zero is treated as unset (default 5900).
    pub port: Option<u16>,
    pub connection_type: Option<ConnectionType>,
    /// Windows username, for RDP connections.
    pub username: Option<String>,
    /// VNC server password, or the Windows password for RDP.
    pub password: Option<String>,
    pub ssh_host: Option<String>,
    pub ssh_user: Option<String>,
    pub ssh_password: Option<String>,
    /// Whether the viewer window opens on connection.
    pub visible: Option<bool>,
    /// Viewer color depth: 8, 16, or 32.
    pub color_depth: Option<u32>,
}

impl ConnectOptions {
    pub fn new(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            port: None,
            connection_type: None,
            username: None,
            password: None,
            ssh_host: None,
            ssh_user: None,
            ssh_password: None,
            visible: None,
            color_depth: None,
        }
    }
}

/// Where a pinch gesture is anchored: a screen point or a named image.
#[derive(Debug, Clone, PartialEq)]
pub enum PinchAnchor {
    Point(Point),
    Image(String),
}

impl PinchAnchor {
    fn to_value(&self) -> Value {
        match self {
            PinchAnchor::Point(p) => Value::Point(*p),
            // Image names travel as quoted string literals.
            PinchAnchor::Image(name) => Value::Str(quote(name)),
        }
    }
}

impl From<Point> for PinchAnchor {
    fn from(p: Point) -> Self {
        PinchAnchor::Point(p)
    }
}

impl From<&str> for PinchAnchor {
    fn from(name: &str) -> Self {
        PinchAnchor::Image(name.to_owned())
    }
}

/// Options for [`Drive::pinch_in`] / [`Drive::pinch_out`].  All fields are
/// optional; an empty set pinches at the screen center with defaults.
#[derive(Debug, Clone, Default)]
pub struct PinchOptions {
    pub at: Option<PinchAnchor>,
    /// Pinch travel distance, in pixels.
    pub distance: Option<i64>,
    pub from: Option<PinchAnchor>,
    pub to: Option<PinchAnchor>,
    pub duration_secs: Option<f64>,
}

// ── Commands ──────────────────────────────────────────────────────────────────

impl<T: Transport> Drive<T> {
    /// Evaluate an expression remotely and return its raw value.
    pub fn evaluate_expression(
        &mut self,
        expression: impl Into<Value>,
    ) -> Result<RawValue, DriveError> {
        let statement = StatementBuilder::expression(expression).render();
        Ok(self.execute(&statement)?.return_value)
    }

    // ── Remote logging ───────────────────────────────────────────────────────

    /// Write a literal message to the remote script log.
    pub fn log(&mut self, message: &str) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command("Log");
        b.quoted_arg(message);
        self.execute(&b.render()).map(|_| ())
    }

    /// Log the value of a remote expression.
    pub fn log_expression(&mut self, expression: impl Into<Value>) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command("Log");
        b.arg(expression);
        self.execute(&b.render()).map(|_| ())
    }

    /// Write a literal message to the remote error log.
    pub fn log_error(&mut self, message: &str) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command("LogError");
        b.quoted_arg(message);
        self.execute(&b.render()).map(|_| ())
    }

    /// Log the value of a remote expression as an error.
    pub fn log_error_expression(
        &mut self,
        expression: impl Into<Value>,
    ) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command("LogError");
        b.arg(expression);
        self.execute(&b.render()).map(|_| ())
    }

    // ── SUT connection ───────────────────────────────────────────────────────

    /// Connect the remote viewer to a system under test.
    pub fn connect(&mut self, options: &ConnectOptions) -> Result<(), DriveError> {
        // A non-positive port means "use the default".
        let port = options.port.filter(|p| *p > 0);

        let mut b = StatementBuilder::command("Connect");
        b.quoted_named_arg("ServerID", options.server_id.as_str())
            .opt_named_arg("PortNum", port)
            .opt_named_arg("Type", options.connection_type.map(ConnectionType::as_str))
            .opt_quoted_named_arg("Username", options.username.as_deref())
            .opt_quoted_named_arg("Password", options.password.as_deref())
            .opt_quoted_named_arg("sshHost", options.ssh_host.as_deref())
            .opt_quoted_named_arg("sshUser", options.ssh_user.as_deref())
            .opt_quoted_named_arg("sshPassword", options.ssh_password.as_deref())
            .opt_named_arg("Visible", options.visible)
            .opt_named_arg("ColorDepth", options.color_depth);
        self.execute(&b.render()).map(|_| ())
    }

    /// Details of the current (or a named) viewer connection.
    pub fn connection_info(
        &mut self,
        connection_name: Option<&str>,
    ) -> Result<Option<PropertyList>, DriveError> {
        let mut b = StatementBuilder::function("ConnectionInfo");
        b.opt_quoted_arg(connection_name);
        let response = self.execute(&b.render())?;
        Ok(response.return_value.as_record().cloned())
    }

    // ── Remote screen ────────────────────────────────────────────────────────

    /// The SUT screen dimensions.
    pub fn remote_screen_size(&mut self) -> Result<Size, DriveError> {
        let statement = StatementBuilder::function("RemoteScreenSize").render();
        Ok(self.execute(&statement)?.return_value.as_size())
    }

    /// The center of the SUT screen.
    pub fn remote_screen_center(&mut self) -> Result<Point, DriveError> {
        let size = self.remote_screen_size()?;
        Ok(Point::new(size.width / 2, size.height / 2))
    }

    // ── Pointer events ───────────────────────────────────────────────────────

    pub fn click(&mut self, point: Point) -> Result<(), DriveError> {
        self.gesture_at("Click", Some(point))
    }

    pub fn click_image(
        &mut self,
        image_name: &str,
        wait_secs: Option<f64>,
    ) -> Result<(), DriveError> {
        self.gesture_at_image("Click", image_name, wait_secs)
    }

    pub fn click_text(
        &mut self,
        text: &str,
        options: &[(&str, Value)],
    ) -> Result<(), DriveError> {
        self.gesture_at_text("Click", text, options)
    }

    pub fn double_click(&mut self, point: Point) -> Result<(), DriveError> {
        self.gesture_at("DoubleClick", Some(point))
    }

    pub fn double_click_image(
        &mut self,
        image_name: &str,
        wait_secs: Option<f64>,
    ) -> Result<(), DriveError> {
        self.gesture_at_image("DoubleClick", image_name, wait_secs)
    }

    pub fn double_click_text(
        &mut self,
        text: &str,
        options: &[(&str, Value)],
    ) -> Result<(), DriveError> {
        self.gesture_at_text("DoubleClick", text, options)
    }

    pub fn right_click(&mut self, point: Point) -> Result<(), DriveError> {
        self.gesture_at("RightClick", Some(point))
    }

    pub fn right_click_image(
        &mut self,
        image_name: &str,
        wait_secs: Option<f64>,
    ) -> Result<(), DriveError> {
        self.gesture_at_image("RightClick", image_name, wait_secs)
    }

    pub fn right_click_text(
        &mut self,
        text: &str,
        options: &[(&str, Value)],
    ) -> Result<(), DriveError> {
        self.gesture_at_text("RightClick", text, options)
    }

    pub fn move_to(&mut self, point: Point) -> Result<(), DriveError> {
        self.gesture_at("MoveTo", Some(point))
    }

    pub fn move_to_image(
        &mut self,
        image_name: &str,
        wait_secs: Option<f64>,
    ) -> Result<(), DriveError> {
        self.gesture_at_image("MoveTo", image_name, wait_secs)
    }

    pub fn move_to_text(
        &mut self,
        text: &str,
        options: &[(&str, Value)],
    ) -> Result<(), DriveError> {
        self.gesture_at_text("MoveTo", text, options)
    }

    // ── Touch gestures ───────────────────────────────────────────────────────

    pub fn tap(&mut self, point: Point) -> Result<(), DriveError> {
        self.gesture_at("Tap", Some(point))
    }

    pub fn tap_image(
        &mut self,
        image_name: &str,
        wait_secs: Option<f64>,
    ) -> Result<(), DriveError> {
        self.gesture_at_image("Tap", image_name, wait_secs)
    }

    pub fn tap_text(&mut self, text: &str, options: &[(&str, Value)]) -> Result<(), DriveError> {
        self.gesture_at_text("Tap", text, options)
    }

    /// Swipe from the screen center (or from `point` when given).
    pub fn swipe_left(&mut self, point: Option<Point>) -> Result<(), DriveError> {
        self.gesture_at("SwipeLeft", point)
    }

    pub fn swipe_left_image(&mut self, image_name: &str) -> Result<(), DriveError> {
        self.gesture_at_image("SwipeLeft", image_name, None)
    }

    pub fn swipe_left_text(
        &mut self,
        text: &str,
        options: &[(&str, Value)],
    ) -> Result<(), DriveError> {
        self.gesture_at_text("SwipeLeft", text, options)
    }

    pub fn swipe_right(&mut self, point: Option<Point>) -> Result<(), DriveError> {
        self.gesture_at("SwipeRight", point)
    }

    pub fn swipe_right_image(&mut self, image_name: &str) -> Result<(), DriveError> {
        self.gesture_at_image("SwipeRight", image_name, None)
    }

    pub fn swipe_right_text(
        &mut self,
        text: &str,
        options: &[(&str, Value)],
    ) -> Result<(), DriveError> {
        self.gesture_at_text("SwipeRight", text, options)
    }

    pub fn swipe_up(&mut self, point: Option<Point>) -> Result<(), DriveError> {
        self.gesture_at("SwipeUp", point)
    }

    pub fn swipe_up_image(&mut self, image_name: &str) -> Result<(), DriveError> {
        self.gesture_at_image("SwipeUp", image_name, None)
    }

    pub fn swipe_up_text(
        &mut self,
        text: &str,
        options: &[(&str, Value)],
    ) -> Result<(), DriveError> {
        self.gesture_at_text("SwipeUp", text, options)
    }

    pub fn swipe_down(&mut self, point: Option<Point>) -> Result<(), DriveError> {
        self.gesture_at("SwipeDown", point)
    }

    pub fn swipe_down_image(&mut self, image_name: &str) -> Result<(), DriveError> {
        self.gesture_at_image("SwipeDown", image_name, None)
    }

    pub fn swipe_down_text(
        &mut self,
        text: &str,
        options: &[(&str, Value)],
    ) -> Result<(), DriveError> {
        self.gesture_at_text("SwipeDown", text, options)
    }

    pub fn pinch_in(&mut self, options: &PinchOptions) -> Result<(), DriveError> {
        self.pinch("PinchIn", options)
    }

    pub fn pinch_out(&mut self, options: &PinchOptions) -> Result<(), DriveError> {
        self.pinch("PinchOut", options)
    }

    // ── Image searching ──────────────────────────────────────────────────────

    /// Metadata records for the named images, or absent if the return value
    /// is not record-list shaped.
    pub fn image_info(
        &mut self,
        image_names: &[&str],
    ) -> Result<Option<Vec<PropertyList>>, DriveError> {
        let mut b = StatementBuilder::function("ImageInfo");
        b.quoted_args(image_names.iter().copied());
        let response = self.execute(&b.render())?;
        Ok(response.return_value.as_record_list())
    }

    /// Block until one of the images appears, faulting on timeout.
    pub fn wait_for(
        &mut self,
        timeout_secs: Option<f64>,
        image_names: &[&str],
    ) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command("WaitFor");
        b.opt_arg(timeout_secs)
            .quoted_args(image_names.iter().copied());
        self.execute(&b.render()).map(|_| ())
    }

    /// Whether any of the images is currently on screen.
    pub fn image_found(
        &mut self,
        timeout_secs: Option<f64>,
        image_names: &[&str],
    ) -> Result<bool, DriveError> {
        let mut b = StatementBuilder::function("ImageFound");
        b.opt_arg(timeout_secs)
            .quoted_args(image_names.iter().copied());
        let response = self.execute(&b.render())?;
        Ok(response.return_value.as_bool() == Some(true))
    }

    /// Every on-screen location of the named images.
    pub fn every_image_location(
        &mut self,
        image_names: &[&str],
    ) -> Result<Option<Vec<Point>>, DriveError> {
        let mut b = StatementBuilder::function("EveryImageLocation");
        b.quoted_args(image_names.iter().copied());
        let response = self.execute(&b.render())?;
        Ok(response.return_value.as_points())
    }

    // ── SUT text ─────────────────────────────────────────────────────────────

    /// Type literal text on the SUT.
    pub fn type_text(&mut self, text: &str) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command("TypeText");
        b.quoted_arg(text);
        self.execute(&b.render()).map(|_| ())
    }

    /// Type the value of a remote expression on the SUT.
    pub fn type_expression(&mut self, expression: impl Into<Value>) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command("TypeText");
        b.arg(expression);
        self.execute(&b.render()).map(|_| ())
    }

    /// OCR text at a point, rectangle, or image; `target` is passed through
    /// as a raw expression operand.
    pub fn read_text(
        &mut self,
        target: impl Into<Value>,
        options: &[(&str, Value)],
    ) -> Result<Option<String>, DriveError> {
        let mut b = StatementBuilder::function("ReadText");
        b.arg(target)
            .named_args(options.iter().map(|(k, v)| (*k, v.clone())));
        let response = self.execute(&b.render())?;
        Ok(response.return_value.as_str().map(str::to_owned))
    }

    /// The SUT clipboard contents, optionally waiting for them to change.
    pub fn remote_clipboard(
        &mut self,
        wait_secs: Option<f64>,
    ) -> Result<Option<String>, DriveError> {
        let mut b = StatementBuilder::function("RemoteClipboard");
        b.opt_arg(wait_secs);
        let response = self.execute(&b.render())?;
        Ok(response.return_value.as_str().map(str::to_owned))
    }

    // ── Mobile device control ────────────────────────────────────────────────

    /// Launch an app, optionally on a named device (`device : app`).
    pub fn launch_app(&mut self, device: Option<&str>, app: &str) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command("LaunchApp");
        match device {
            Some(device) => b.quoted_arg(format!("{device} : {app}")),
            None => b.quoted_arg(app),
        };
        self.execute(&b.render()).map(|_| ())
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn gesture_at(&mut self, command: &str, point: Option<Point>) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command(command);
        b.opt_arg(point);
        self.execute(&b.render()).map(|_| ())
    }

    fn gesture_at_image(
        &mut self,
        command: &str,
        image_name: &str,
        wait_secs: Option<f64>,
    ) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command(command);
        b.quoted_named_arg("Image", image_name)
            .opt_named_arg("WaitFor", wait_secs);
        self.execute(&b.render()).map(|_| ())
    }

    fn gesture_at_text(
        &mut self,
        command: &str,
        text: &str,
        options: &[(&str, Value)],
    ) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command(command);
        b.quoted_named_arg("Text", text)
            .named_args(options.iter().map(|(k, v)| (*k, v.clone())));
        self.execute(&b.render()).map(|_| ())
    }

    fn pinch(&mut self, command: &str, options: &PinchOptions) -> Result<(), DriveError> {
        let mut b = StatementBuilder::command(command);
        b.opt_named_arg("At", options.at.as_ref().map(PinchAnchor::to_value))
            .opt_named_arg("Distance", options.distance)
            .opt_named_arg("From", options.from.as_ref().map(PinchAnchor::to_value))
            .opt_named_arg("To", options.to.as_ref().map(PinchAnchor::to_value))
            .opt_named_arg("Duration", options.duration_secs);
        self.execute(&b.render()).map(|_| ())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
