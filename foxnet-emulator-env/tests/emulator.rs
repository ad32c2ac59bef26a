use anyhow::Result;
use foxnet_core::{
    collector::NoOverride, Batch, CollectorConfig, Env, Frame, FrameReplayBufferConfig,
    OnlineCollector, Policy, StackedFrames,
};
use foxnet_core::reward::{HealthReader, ScoreReader, ScoreReading};
use foxnet_emulator_env::{
    decode_frame, encode_frame, error::EmulatorEnvError, reward::Glyph, ActionSymbol,
    ChannelConfig, DigitTemplateReader, EmulatorEnv, EmulatorEnvConfig, FrameChannel, FrameDims,
    HealthBarReader,
};
use image::{ImageBuffer, Rgb};
use ndarray::{s, Array3};
use std::{
    io::{Cursor, Read, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
};
use tempdir::TempDir;

const WIDTH: usize = 160;
const HEIGHT: usize = 120;

/// Serves `frame` after connecting and after every action, returns the received bitmasks.
fn fake_emulator(listener: TcpListener, frame: Frame) -> JoinHandle<Vec<u32>> {
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let wire = encode_frame(&frame);
        let mut masks = vec![];
        if stream.write_all(&wire).is_err() {
            return masks;
        }
        let mut buf = [0u8; 4];
        while stream.read_exact(&mut buf).is_ok() {
            masks.push(u32::from_ne_bytes(buf));
            if stream.write_all(&wire).is_err() {
                break;
            }
        }
        masks
    })
}

fn channel_config(port: u16) -> ChannelConfig {
    ChannelConfig::default()
        .port(port)
        .connect_attempts(5)
        .connect_backoff_ms(10)
        .dims(FrameDims::new(WIDTH, HEIGHT, 3))
}

fn digit_template(d: u8) -> Frame {
    let mut t = Array3::zeros((31, 26, 3));
    let c = 2 * d as usize;
    t.slice_mut(s![.., c..c + 2, ..]).fill(255);
    t
}

/// A game screen showing score `0 0 5` and a full health bar.
fn game_screen() -> Frame {
    let mut full = Array3::from_elem((HEIGHT, WIDTH, 3), 10u8);
    full.slice_mut(s![42..53, 56..149, ..]).fill(170);
    for (k, d) in [0u8, 0, 5].iter().enumerate() {
        let left = 47 + 26 * k;
        full.slice_mut(s![65..96, left..left + 26, ..])
            .assign(&digit_template(*d));
    }
    full
}

/// Lays out an RGB screen the way the emulator reads it: rows bottom-up, RGB pixels.
fn emulator_bytes(rgb: &Frame) -> Vec<u8> {
    let (h, w, _) = rgb.dim();
    let mut buf = Vec::with_capacity(rgb.len());
    for i in (0..h).rev() {
        for j in 0..w {
            buf.extend(rgb.slice(s![i, j, ..]).iter());
        }
    }
    buf
}

/// A digit drawn as blue strokes on a red background.
fn colored_digit(d: u8) -> Frame {
    let c = 2 * d as usize;
    Array3::from_shape_fn((31, 26, 3), |(_, j, k)| {
        let stroke = (c..c + 2).contains(&j);
        match (stroke, k) {
            (true, 2) | (false, 0) => 255,
            _ => 0,
        }
    })
}

/// Serves prepared bytes and keeps what is written.
struct MemoryStream {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct ConstPolicy(Vec<f32>);

impl Policy for ConstPolicy {
    fn evaluate(&mut self, obs: &StackedFrames) -> Result<Vec<f32>> {
        assert_eq!(obs.shape(), &[2, 48, 64, 3]);
        Ok(self.0.clone())
    }
}

#[test]
fn test_connect_exhaustion() -> Result<()> {
    // Reserve a port and release it so that nothing listens there
    let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let config = channel_config(port).connect_attempts(3);

    let err = FrameChannel::connect(&config).err().unwrap();
    assert_eq!(
        err.downcast_ref::<EmulatorEnvError>(),
        Some(&EmulatorEnvError::ConnectionFailed {
            addr: format!("127.0.0.1:{}", port),
            attempts: 3
        })
    );
    Ok(())
}

#[test]
fn test_loopback_env() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    let frame = Array3::from_shape_fn((HEIGHT, WIDTH, 3), |(i, j, c)| (i + 2 * j + c) as u8);
    let emulator = fake_emulator(listener, frame.clone());

    let config = EmulatorEnvConfig::default()
        .channel(channel_config(port))
        .state_size(40, 30);
    let mut env = EmulatorEnv::build(&config)?;

    let obs = env.read_observation()?;
    assert_eq!(obs.full, frame);
    assert_eq!(obs.state.dim(), (30, 40, 3));

    env.send_action(&ActionSymbol::Fire)?;
    let obs = env.read_observation()?;
    assert_eq!(obs.full, frame);
    env.send_action(&ActionSymbol::Left)?;
    drop(env);

    assert_eq!(emulator.join().unwrap(), vec![0x80, 0x00b0_0000]);
    Ok(())
}

#[test]
fn test_collect_over_loopback() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new("digit_templates")?;
    for d in 0..10u8 {
        let t = digit_template(d);
        let img = ImageBuffer::<Rgb<u8>, _>::from_raw(26, 31, t.into_raw_vec()).unwrap();
        img.save(dir.path().join(format!("{}.png", d)))?;
    }
    let score_reader = DigitTemplateReader::from_dir(dir.path())?;
    assert_eq!(
        score_reader.read_glyphs(&game_screen()),
        Some(vec![Some(Glyph::Digit(0)), Some(Glyph::Digit(0)), Some(Glyph::Digit(5))])
    );
    let health_reader = HealthBarReader::new(Array3::from_elem((11, 93, 3), 180))?;

    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    let emulator = fake_emulator(listener, game_screen());

    let env_config = EmulatorEnvConfig::default().channel(channel_config(port));
    let env = EmulatorEnv::build(&env_config)?;
    let config = CollectorConfig::default()
        .batch_size(2)
        .frame_skip(2)
        .epsilon(0.0)
        .replay_buffer(
            FrameReplayBufferConfig::default()
                .capacity(10)
                .frames_per_state(2),
        );
    let mut collector =
        OnlineCollector::build(&config, env, score_reader, health_reader, NoOverride)?;
    let mut policy = ConstPolicy(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    let batch = collector.next_batch(&mut policy)?;
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.act, vec![4, 4]);
    assert_eq!(batch.reward, vec![15.0, 15.0]);
    assert_eq!(collector.env_steps(), 3);
    drop(collector);

    // 3 decisions and 2 repeated actions
    let masks = emulator.join().unwrap();
    assert_eq!(masks.len(), 5);
    assert!(masks.iter().all(|&m| m == 0x80));
    Ok(())
}

#[test]
fn test_readers_on_emulator_byte_order() -> Result<()> {
    let red = [200u8, 40, 40];
    let mut screen = Array3::from_elem((HEIGHT, WIDTH, 3), 10u8);
    screen
        .slice_mut(s![42..53, 56..149, ..])
        .assign(&Array3::from_shape_fn((11, 93, 3), |(_, _, c)| red[c]));
    for (k, d) in [0u8, 4, 2].iter().enumerate() {
        let left = 47 + 26 * k;
        screen
            .slice_mut(s![65..96, left..left + 26, ..])
            .assign(&colored_digit(*d));
    }

    let frame = decode_frame(&emulator_bytes(&screen), FrameDims::new(WIDTH, HEIGHT, 3))?;
    assert_eq!(frame.slice(s![45, 60, ..]).to_vec(), vec![40, 40, 200]);

    let mut health_reader =
        HealthBarReader::new(Array3::from_shape_fn((11, 93, 3), |(_, _, c)| red[c]))?;
    assert_eq!(health_reader.read_health(&frame), 1.0);

    let templates = (0..10)
        .map(|d| (Glyph::Digit(d), colored_digit(d)))
        .collect::<Vec<_>>();
    let mut score_reader = DigitTemplateReader::new(templates)?;
    assert_eq!(score_reader.read_score(&frame), ScoreReading::Digits(42));
    Ok(())
}

#[test]
fn test_collect_over_memory_stream() -> Result<()> {
    let wire = encode_frame(&game_screen());
    let stream = MemoryStream {
        input: Cursor::new(wire.repeat(3)),
        output: vec![],
    };
    let channel = FrameChannel::from_stream(stream, FrameDims::new(WIDTH, HEIGHT, 3));
    let env = EmulatorEnv::from_channel(channel, EmulatorEnvConfig::default())?;

    let templates = (0..10)
        .map(|d| (Glyph::Digit(d), digit_template(d)))
        .collect::<Vec<_>>();
    let score_reader = DigitTemplateReader::new(templates)?;
    let health_reader = HealthBarReader::new(Array3::from_elem((11, 93, 3), 180))?;
    let config = CollectorConfig::default()
        .frame_skip(1)
        .epsilon(0.0)
        .replay_buffer(FrameReplayBufferConfig::default().frames_per_state(2));
    let mut collector =
        OnlineCollector::build(&config, env, score_reader, health_reader, NoOverride)?;
    let mut policy = ConstPolicy(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    for _ in 0..2 {
        let record = collector.step(&mut policy)?;
        assert_eq!(record.get_scalar("reward")?, 15.0);
    }

    let output = &collector.env().channel().get_ref().output;
    assert_eq!(output.len(), 8);
    assert!(output
        .chunks(4)
        .all(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]) == 0x80));

    // Nothing left to read
    assert!(collector.step(&mut policy).is_err());
    Ok(())
}
