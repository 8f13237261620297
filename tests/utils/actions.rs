//! Scripted players that speak the raw wire format
#![allow(dead_code)] // Test utilities may not all be used in every test

use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

// ============================================================================
// Raw protocol actions
// ============================================================================

pub async fn send_want_game(stream: &mut DuplexStream) -> io::Result<()> {
    stream.write_all(&[0x00, 0x00]).await
}

/// Reads a GAMESTART and returns the 26 dealt card values in deal order.
pub async fn read_hand(stream: &mut DuplexStream) -> io::Result<Vec<u8>> {
    let mut frame = [0u8; 27];
    stream.read_exact(&mut frame).await?;
    assert_eq!(frame[0], 0x01, "expected GAMESTART");
    Ok(frame[1..].to_vec())
}

/// Plays one card and returns the PLAYRESULT outcome byte.
pub async fn play_card(stream: &mut DuplexStream, card: u8) -> io::Result<u8> {
    stream.write_all(&[0x02, card]).await?;
    let mut result = [0u8; 2];
    stream.read_exact(&mut result).await?;
    assert_eq!(result[0], 0x03, "expected PLAYRESULT");
    Ok(result[1])
}

pub fn score_of(outcome: u8) -> i32 {
    match outcome {
        0 => 1,
        2 => -1,
        _ => 0,
    }
}

/// Plays the listed cards in order, returning the running score.
pub async fn play_cards(stream: &mut DuplexStream, cards: &[u8]) -> io::Result<i32> {
    let mut score = 0;
    for &card in cards {
        score += score_of(play_card(stream, card).await?);
    }
    Ok(score)
}

/// Asks for a game and plays the dealt hand in order.
/// Returns the hand and the final score.
pub async fn play_full_game(stream: &mut DuplexStream) -> io::Result<(Vec<u8>, i32)> {
    send_want_game(stream).await?;
    let hand = read_hand(stream).await?;
    let score = play_cards(stream, &hand).await?;
    Ok((hand, score))
}

/// A card value that is not in `hand`.
pub fn foreign_card(hand: &[u8]) -> u8 {
    (0..52u8)
        .find(|card| !hand.contains(card))
        .expect("a hand never holds the whole deck")
}

/// Asserts the server side has closed the channel.
pub async fn assert_closed(stream: &mut DuplexStream) {
    let mut buf = [0u8; 2];
    match stream.read(&mut buf).await {
        Ok(0) => {}
        Ok(n) => panic!("expected the connection to be closed, read {} bytes", n),
        Err(_) => {}
    }
}
