use std::env;

pub struct RazorpaySettings {
    /// Publishable key, returned to clients for the checkout widget.
    pub key_id: String,
    pub key_secret: String,
    pub webhook_secret: String,
}

pub struct Config {
    pub database_url: String,
    pub frontend_origin: String,
    /// Secure cookies are mandatory with SameSite=None; off only for local
    /// plain-http development.
    pub auth_cookie_secure: bool,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub razorpay: RazorpaySettings,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let frontend_origin = env::var("FRONTEND_ORIGIN").expect("FRONTEND_ORIGIN must be set");

        let auth_cookie_secure = env::var("AUTH_COOKIE_SECURE")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let jwt_issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "mealmate".to_string());
        let jwt_audience = env::var("JWT_AUDIENCE").unwrap_or_else(|_| "mealmate-app".to_string());

        let razorpay = RazorpaySettings {
            key_id: env::var("RAZORPAY_KEY_ID").expect("RAZORPAY_KEY_ID must be set"),
            key_secret: env::var("RAZORPAY_KEY_SECRET").expect("RAZORPAY_KEY_SECRET must be set"),
            webhook_secret: env::var("RAZORPAY_WEBHOOK_SECRET")
                .expect("RAZORPAY_WEBHOOK_SECRET must be set"),
        };

        Config {
            database_url,
            frontend_origin,
            auth_cookie_secure,
            jwt_issuer,
            jwt_audience,
            razorpay,
        }
    }
}
