/// Async counterpart to the standard library's `TryFrom<T>` trait, for
/// conversions that need I/O to produce their value.
pub trait AsyncTryFrom<T>: Sized {
    /// The error type that can occur during conversion.
    type Error;

    /// Performs the fallible asynchronous conversion from `T` to `Self`.
    async fn async_try_from(value: T) -> Result<Self, Self::Error>;
}

/// Async counterpart to `TryInto<T>`.
pub trait AsyncTryInto<T> {
    /// The error type that can occur during conversion.
    type Error;

    /// Performs the fallible asynchronous conversion from `Self` to `T`.
    async fn async_try_into(self) -> Result<T, Self::Error>;
}

/// Blanket implementation for `AsyncTryInto<U>` when `U` implements
/// `AsyncTryFrom<T>`, mirroring the standard library's `TryInto` blanket.
impl<T, U> AsyncTryInto<U> for T
where
    U: AsyncTryFrom<T>,
{
    type Error = U::Error;

    async fn async_try_into(self) -> Result<U, Self::Error> {
        U::async_try_from(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Parsed(i32);

    impl AsyncTryFrom<&str> for Parsed {
        type Error = std::num::ParseIntError;

        async fn async_try_from(value: &str) -> Result<Self, Self::Error> {
            Ok(Parsed(value.parse()?))
        }
    }

    #[compio::test]
    async fn async_try_from_parses() {
        let parsed = Parsed::async_try_from("42").await.unwrap();
        assert_eq!(parsed.0, 42);
    }

    #[compio::test]
    async fn async_try_from_propagates_errors() {
        assert!(Parsed::async_try_from("not a number").await.is_err());
    }

    #[compio::test]
    async fn blanket_async_try_into_delegates() {
        let parsed: Result<Parsed, _> = "7".async_try_into().await;
        assert_eq!(parsed.unwrap().0, 7);
    }
}
